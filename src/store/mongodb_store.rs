//! MongoDB-backed [`SettingsStore`] implementation.
//!
//! Each collection/id pair maps to a document looked up by `_id`:
//!
//! ```json
//! { "_id": "config", "whatsapp_redirect_number": "...", "referral_domain": "..." }
//! ```

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Database};

use super::SettingsStore;
use crate::error::{FetchError, FetchErrorKind, ServiceError};
use crate::settings::{GeneralSettings, SettingValue, UnsupportedValue};

const STORE_NAME: &str = "mongodb";

// Server error codes for Unauthorized and AuthenticationFailed.
const UNAUTHORIZED_CODES: [i32; 2] = [13, 18];

pub struct MongoDbStore {
    database: Database,
}

impl MongoDbStore {
    /// Connect and ping the deployment before accepting requests.
    pub async fn new(url: &str, database: &str) -> Result<Self, ServiceError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| ServiceError::Database {
                backend: STORE_NAME,
                source: Box::new(e),
            })?;

        let database = client.database(database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ServiceError::Database {
                backend: STORE_NAME,
                source: Box::new(e),
            })?;

        tracing::info!(database = %database.name(), "connected to mongodb");
        Ok(Self { database })
    }
}

#[async_trait]
impl SettingsStore for MongoDbStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<GeneralSettings>, FetchError> {
        let document = self
            .database
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| FetchError::new(classify(&e.kind), STORE_NAME, e))?;

        document
            .map(settings_from_document)
            .transpose()
            .map_err(|e| FetchError::parse(STORE_NAME, e))
    }
}

fn classify(kind: &ErrorKind) -> FetchErrorKind {
    match kind {
        ErrorKind::Authentication { .. } => FetchErrorKind::Auth,
        ErrorKind::Command(err) if UNAUTHORIZED_CODES.contains(&err.code) => FetchErrorKind::Auth,
        ErrorKind::Io(err) if err.kind() == std::io::ErrorKind::TimedOut => FetchErrorKind::Timeout,
        ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => FetchErrorKind::Network,
        ErrorKind::BsonDeserialization(_) | ErrorKind::InvalidResponse { .. } => {
            FetchErrorKind::Parse
        }
        _ => FetchErrorKind::Other,
    }
}

/// Convert a stored document into settings, dropping the `_id` key.
fn settings_from_document(document: Document) -> Result<GeneralSettings, UnsupportedValue> {
    let mut settings = GeneralSettings::new();
    for (key, value) in document {
        if key == "_id" {
            continue;
        }
        let value = match value {
            Bson::String(s) => SettingValue::Text(s),
            Bson::Boolean(b) => SettingValue::Flag(b),
            Bson::Int32(n) => SettingValue::Number(n.into()),
            Bson::Int64(n) => SettingValue::Number(n.into()),
            Bson::Double(f) => match number_from_double(f) {
                Some(n) => SettingValue::Number(n),
                None => {
                    return Err(UnsupportedValue {
                        key,
                        found: "non-finite double",
                    })
                }
            },
            other => {
                return Err(UnsupportedValue {
                    key,
                    found: bson_type_name(&other),
                })
            }
        };
        settings.insert(key, value);
    }
    Ok(settings)
}

// Whole doubles inside the i64 range are served as integers.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn number_from_double(f: f64) -> Option<serde_json::Number> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some((f as i64).into());
    }
    serde_json::Number::from_f64(f)
}

fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Null | Bson::Undefined => "null",
        Bson::Array(_) => "array",
        Bson::Document(_) => "document",
        Bson::DateTime(_) | Bson::Timestamp(_) => "date",
        Bson::Binary(_) => "binary",
        Bson::ObjectId(_) => "objectId",
        _ => "unsupported bson",
    }
}
