//! Integration tests for `GET /api/general-settings`.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use serde_json::{json, Value};

use general_settings::error::{FetchError, FetchErrorKind};
use general_settings::server::{self, AppState, NO_CACHE};
use general_settings::settings::{GeneralSettings, COLLECTION, DOCUMENT_ID};
use general_settings::store::memory_store::MemoryStore;
use general_settings::store::SettingsStore;

struct FailingStore {
    kind: FetchErrorKind,
}

#[async_trait]
impl SettingsStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn get_document(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<GeneralSettings>, FetchError> {
        Err(FetchError::new(
            self.kind,
            "failing",
            "PERMISSION_DENIED: missing role settings.reader on project internal-42",
        ))
    }
}

async fn start_test_server(
    store: Arc<dyn SettingsStore>,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState::new(store));
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

fn settings_url(addr: SocketAddr) -> String {
    format!("http://{addr}/api/general-settings")
}

async fn seeded_store(fields: &[(&str, &str)]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let mut settings = GeneralSettings::new();
    for (key, value) in fields {
        settings.insert(*key, *value);
    }
    store.insert(COLLECTION, DOCUMENT_ID, settings).await;
    store
}

#[tokio::test]
async fn stored_document_is_returned_verbatim() {
    let store = seeded_store(&[("a", "x"), ("b", "y")]).await;
    let (addr, shutdown) = start_test_server(store).await;

    let resp = reqwest::get(settings_url(addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "a": "x", "b": "y" }));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn stored_document_is_not_merged_with_defaults() {
    let store = seeded_store(&[("referral_domain", "example.org")]).await;
    let (addr, shutdown) = start_test_server(store).await;

    let body: Value = reqwest::get(settings_url(addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "referral_domain": "example.org" }));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn missing_document_returns_defaults() {
    let (addr, shutdown) = start_test_server(Arc::new(MemoryStore::new())).await;

    let resp = reqwest::get(settings_url(addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "whatsapp_redirect_number": "+62 815-1780-0900",
            "referral_domain": "www.kacamatagratis.org",
        })
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn store_failure_returns_generic_500() {
    for kind in [
        FetchErrorKind::Network,
        FetchErrorKind::Auth,
        FetchErrorKind::Timeout,
        FetchErrorKind::Parse,
    ] {
        let (addr, shutdown) = start_test_server(Arc::new(FailingStore { kind })).await;

        let resp = reqwest::get(settings_url(addr)).await.unwrap();
        assert_eq!(resp.status(), 500);
        let text = resp.text().await.unwrap();
        assert!(!text.contains("PERMISSION_DENIED"));
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({ "error": "Failed to fetch settings" }));

        let _ = shutdown.send(());
    }
}

#[tokio::test]
async fn every_branch_is_json_and_uncacheable() {
    let found = seeded_store(&[("a", "x")]).await;
    let stores: [Arc<dyn SettingsStore>; 3] = [
        found,
        Arc::new(MemoryStore::new()),
        Arc::new(FailingStore {
            kind: FetchErrorKind::Other,
        }),
    ];

    for store in stores {
        let (addr, shutdown) = start_test_server(store).await;

        let resp = reqwest::get(settings_url(addr)).await.unwrap();
        let headers = resp.headers().clone();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[CACHE_CONTROL], NO_CACHE);
        assert_eq!(headers[PRAGMA], "no-cache");
        let _: Value = resp.json().await.unwrap();

        let _ = shutdown.send(());
    }
}

#[tokio::test]
async fn document_changes_are_visible_on_next_request() {
    let store = seeded_store(&[("referral_domain", "first.example")]).await;
    let (addr, shutdown) = start_test_server(store.clone()).await;

    let first: Value = reqwest::get(settings_url(addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut updated = GeneralSettings::new();
    updated.insert("referral_domain", "second.example");
    store.insert(COLLECTION, DOCUMENT_ID, updated).await;

    let second: Value = reqwest::get(settings_url(addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(second, json!({ "referral_domain": "second.example" }));

    store.remove(COLLECTION, DOCUMENT_ID).await;
    let third: Value = reqwest::get(settings_url(addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(third["referral_domain"], "www.kacamatagratis.org");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let store = seeded_store(&[("a", "x"), ("b", "y")]).await;
    let (addr, shutdown) = start_test_server(store).await;

    let first = reqwest::get(settings_url(addr)).await.unwrap();
    let first_status = first.status();
    let first_body = first.text().await.unwrap();

    let second = reqwest::get(settings_url(addr)).await.unwrap();
    assert_eq!(second.status(), first_status);
    assert_eq!(second.text().await.unwrap(), first_body);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let (addr, shutdown) = start_test_server(Arc::new(MemoryStore::new())).await;

    let resp = reqwest::Client::new()
        .get(settings_url(addr))
        .header("x-correlation-id", "req-1234")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-correlation-id"], "req-1234");

    let generated = reqwest::get(settings_url(addr)).await.unwrap();
    assert!(generated.headers().contains_key("x-correlation-id"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn empty_correlation_id_is_replaced() {
    let (addr, shutdown) = start_test_server(Arc::new(MemoryStore::new())).await;

    let resp = reqwest::Client::new()
        .get(settings_url(addr))
        .header("x-correlation-id", "")
        .send()
        .await
        .unwrap();
    let echoed = resp.headers()["x-correlation-id"].to_str().unwrap();
    assert!(!echoed.is_empty());
    assert!(uuid::Uuid::parse_str(echoed).is_ok());

    let _ = shutdown.send(());
}
