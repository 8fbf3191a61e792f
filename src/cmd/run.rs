//! `general-settings run`: start the settings server.
//!
//! Picks the settings store from the CLI flags, starts the Axum HTTP server,
//! and serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::error::ServiceError;
use crate::logging;
use crate::server::{self, AppState, SETTINGS_PATH};
use crate::store::file_store::FileStore;
use crate::store::SettingsStore;

pub async fn execute(args: RunArgs) -> Result<(), ServiceError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let store = resolve_store(&args).await?;

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args.sentry_dsn.as_ref().map(|dsn| {
        crate::sentry_integration::init(dsn, args.sentry_environment.as_deref(), store.name())
    });

    let store_name = store.name();
    let state = Arc::new(AppState::new(store));
    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        store = store_name,
        path = SETTINGS_PATH,
        "general-settings started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("general-settings stopped");
    Ok(())
}

async fn resolve_store(args: &RunArgs) -> Result<Arc<dyn SettingsStore>, ServiceError> {
    #[cfg(feature = "mongodb")]
    if let Some(ref url) = args.mongodb_url {
        let store =
            crate::store::mongodb_store::MongoDbStore::new(url, &args.mongodb_database).await?;
        return Ok(Arc::new(store));
    }

    if let Some(ref path) = args.settings_file {
        tracing::info!(path = %path.display(), "serving settings from file");
        return Ok(Arc::new(FileStore::new(path.clone())));
    }

    Err(ServiceError::NoStore {
        hint: "Provide --mongodb-url <url> or --settings-file <file>.".into(),
    })
}
