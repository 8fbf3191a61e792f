//! `GET /api/general-settings` handler.
//!
//! Reads the `general_settings/config` document on every request. A missing
//! document yields [`GeneralSettings::defaults`]; any store failure yields
//! the generic 500 body from [`FetchError`].

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{GeneralSettings, COLLECTION, DOCUMENT_ID};
use crate::server::AppState;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

pub async fn general_settings_handler(
    State(state): State<Arc<AppState>>,
    req_headers: HeaderMap,
) -> Response {
    let correlation_id = req_headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let mut response = match state.store.get_document(COLLECTION, DOCUMENT_ID).await {
        Ok(Some(settings)) => {
            state.stats.found.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                correlation_id = %correlation_id,
                fields = settings.len(),
                "settings served"
            );
            Json(settings).into_response()
        }
        Ok(None) => {
            state.stats.defaulted.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                correlation_id = %correlation_id,
                collection = COLLECTION,
                id = DOCUMENT_ID,
                "settings document missing, serving defaults"
            );
            Json(GeneralSettings::defaults()).into_response()
        }
        Err(e) => {
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                correlation_id = %correlation_id,
                kind = %e.kind(),
                store = e.store(),
                error = %e,
                "failed to fetch settings"
            );
            e.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}
