//! JSON file backed [`SettingsStore`] for local development.
//!
//! The file holds one object keyed by collection, then by document id:
//!
//! ```json
//! { "general_settings": { "config": { "referral_domain": "example.org" } } }
//! ```
//!
//! The file is re-read on every call so edits show up on the next request.

use std::path::PathBuf;

use async_trait::async_trait;

use super::SettingsStore;
use crate::error::{FetchError, FetchErrorKind};
use crate::settings::GeneralSettings;

const STORE_NAME: &str = "file";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_content(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Io, STORE_NAME, e))
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    fn name(&self) -> &'static str {
        STORE_NAME
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<GeneralSettings>, FetchError> {
        let content = self.read_content().await?;
        let mut root: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| FetchError::parse(STORE_NAME, e))?;

        let Some(collection_value) = root.remove(collection) else {
            return Ok(None);
        };
        let serde_json::Value::Object(mut documents) = collection_value else {
            return Err(FetchError::parse(
                STORE_NAME,
                format!("collection '{collection}' is not an object"),
            ));
        };

        match documents.remove(id) {
            None => Ok(None),
            Some(serde_json::Value::Object(fields)) => GeneralSettings::from_json_object(fields)
                .map(Some)
                .map_err(|e| FetchError::parse(STORE_NAME, e)),
            Some(_) => Err(FetchError::parse(
                STORE_NAME,
                format!("document '{collection}/{id}' is not an object"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn temp_file(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("settings-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_document_fields() {
        let path = temp_file(
            r#"{"general_settings": {"config": {"referral_domain": "example.org", "limit": 3}}}"#,
        );
        let store = FileStore::new(path.clone());

        let settings = store
            .get_document("general_settings", "config")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            settings.get("referral_domain"),
            Some(&SettingValue::from("example.org"))
        );
        assert_eq!(settings.get("limit"), Some(&SettingValue::from(3_i64)));
        assert_eq!(settings.len(), 2);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_collection_or_document_is_none() {
        let path = temp_file(r#"{"general_settings": {"other": {}}}"#);
        let store = FileStore::new(path.clone());

        assert!(store
            .get_document("general_settings", "config")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .get_document("unknown", "config")
            .await
            .unwrap()
            .is_none());

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("absent-{}.json", uuid::Uuid::new_v4()));
        let err = FileStore::new(path)
            .get_document("general_settings", "config")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Io);
    }

    #[tokio::test]
    async fn malformed_content_is_parse_error() {
        let path = temp_file("{ not json");
        let err = FileStore::new(path.clone())
            .get_document("general_settings", "config")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Parse);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn nested_value_is_parse_error() {
        let path = temp_file(r#"{"general_settings": {"config": {"nested": {"a": 1}}}}"#);
        let err = FileStore::new(path.clone())
            .get_document("general_settings", "config")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Parse);
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn edits_are_visible_on_next_read() {
        let path = temp_file(r#"{"general_settings": {"config": {"a": "x"}}}"#);
        let store = FileStore::new(path.clone());
        let first = store.get_document("general_settings", "config").await.unwrap();

        std::fs::write(&path, r#"{"general_settings": {"config": {"a": "y"}}}"#).unwrap();
        let second = store.get_document("general_settings", "config").await.unwrap();

        assert_ne!(first, second);
        std::fs::remove_file(path).unwrap();
    }
}
