//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload with the server version,
//! build commit, uptime, the configured store backend, and cumulative
//! settings request statistics. The store itself is not contacted.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub commit: String,
    pub uptime_seconds: u64,
    pub store: String,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub settings_found: u64,
    pub settings_defaulted: u64,
    pub settings_failed: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: env!("GENERAL_SETTINGS_GIT_SHORT").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        store: state.store.name().to_string(),
        stats: StatsResponse {
            settings_found: state.stats.found.load(Ordering::Relaxed),
            settings_defaulted: state.stats.defaulted.load(Ordering::Relaxed),
            settings_failed: state.stats.failed.load(Ordering::Relaxed),
        },
    })
}
