//! `general-settings health`: check the health of a running instance.
//!
//! Sends a `GET /health` request to the given URL and prints the response
//! as a summary or raw JSON.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::ServiceError;
use crate::health::HealthResponse;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn execute(args: HealthArgs) -> Result<(), ServiceError> {
    let body = fetch_health(&health_url(&args.url)).await?;

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print_summary(&args.url, &health),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

fn request_failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> ServiceError {
    ServiceError::HttpRequest {
        source: source.into(),
    }
}

/// GET the health document, failing on timeout or a non-2xx status.
async fn fetch_health(url: &str) -> Result<Bytes, ServiceError> {
    let uri: hyper::Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
        ServiceError::UriParse {
            source: Box::new(e),
        }
    })?;

    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    let req = hyper::Request::builder()
        .uri(uri)
        .body(Full::new(Bytes::new()))
        .map_err(request_failed)?;

    let response = tokio::time::timeout(HEALTH_TIMEOUT, client.request(req))
        .await
        .map_err(|_| request_failed("health check timed out after 10s"))?
        .map_err(request_failed)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::HealthCheckFailed(status));
    }

    Ok(response
        .into_body()
        .collect()
        .await
        .map_err(request_failed)?
        .to_bytes())
}

fn print_summary(url: &str, health: &HealthResponse) {
    println!("\u{2713} general-settings is healthy ({url})");
    println!("  version:   {} ({})", health.version, health.commit);
    println!("  uptime:    {}", format_uptime(health.uptime_seconds));
    println!("  store:     {}", health.store);
    println!(
        "  requests:  {} found, {} defaulted, {} failed",
        health.stats.settings_found, health.stats.settings_defaulted, health.stats.settings_failed
    );
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
