//! In-process [`SettingsStore`] holding documents in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SettingsStore;
use crate::error::FetchError;
use crate::settings::GeneralSettings;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<(String, String), GeneralSettings>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, collection: &str, id: &str, settings: GeneralSettings) {
        self.documents
            .write()
            .await
            .insert((collection.to_owned(), id.to_owned()), settings);
    }

    pub async fn remove(&self, collection: &str, id: &str) -> Option<GeneralSettings> {
        self.documents
            .write()
            .await
            .remove(&(collection.to_owned(), id.to_owned()))
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<GeneralSettings>, FetchError> {
        let documents = self.documents.read().await;
        Ok(documents
            .get(&(collection.to_owned(), id.to_owned()))
            .cloned())
    }
}
