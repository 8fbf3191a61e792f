//! Error types for the settings service.
//!
//! [`FetchError`] is the single failure a settings read can produce. It
//! carries a [`FetchErrorKind`] for logs, but always renders as the same
//! generic 500 response. [`ServiceError`] covers startup and CLI failures.
//! Both use `thiserror` for `Display` and `Error` derives.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body message returned to callers for every fetch failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchErrorKind {
    Network,
    Auth,
    Timeout,
    Parse,
    Io,
    Other,
}

impl FetchErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Timeout => "timeout",
            Self::Parse => "parse",
            Self::Io => "io",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{kind} error reading settings from {store}: {source}")]
pub struct FetchError {
    kind: FetchErrorKind,
    store: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl FetchError {
    pub fn new(
        kind: FetchErrorKind,
        store: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            store,
            source: source.into(),
        }
    }

    pub fn parse(
        store: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::new(FetchErrorKind::Parse, store, source)
    }

    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    #[must_use]
    pub const fn store(&self) -> &'static str {
        self.store
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: FETCH_FAILED_MESSAGE,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("No settings store configured.\n\n  {hint}")]
    NoStore { hint: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),

    #[error("Database error ({backend}): {source}")]
    #[cfg(feature = "mongodb")]
    Database {
        backend: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
