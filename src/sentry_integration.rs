//! Optional Sentry error tracking integration.
//!
//! Failed settings fetches are logged at error level and reach Sentry through
//! the `sentry-tracing` layer installed by [`crate::logging::init`]. Every
//! event is tagged with the configured store backend. The returned guard must
//! be held for the lifetime of the server.

pub fn init(dsn: &str, environment: Option<&str>, store: &'static str) -> sentry::ClientInitGuard {
    let Ok(parsed_dsn) = dsn.parse::<sentry::types::Dsn>() else {
        tracing::warn!("invalid Sentry DSN, error tracking disabled");
        return sentry::init(sentry::ClientOptions::default());
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(parsed_dsn),
        environment: environment.map(|e| e.to_owned().into()),
        release: Some(env!("CARGO_PKG_VERSION").into()),
        ..Default::default()
    });
    sentry::configure_scope(|scope| scope.set_tag("settings_store", store));
    guard
}
