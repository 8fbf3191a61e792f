//! General settings service.
//!
//! Serves the application-wide settings document over
//! `GET /api/general-settings`. The document is read from a document store
//! on every request; a missing document yields built-in defaults and any
//! store failure yields a generic 500 response.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`error`] -- [`FetchError`](error::FetchError) and startup error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum router, shared application state, and graceful shutdown.
//! - [`settings`] -- The settings data model and its HTTP handler.
//! - [`store`] -- The [`SettingsStore`](store::SettingsStore) trait and its backends.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `mongodb` | MongoDB settings store _(enabled by default)_ |
//! | `sentry-integration` | Sentry error tracking |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
pub mod settings;
pub mod store;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
