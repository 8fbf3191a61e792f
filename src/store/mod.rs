//! Document store backends for the settings document.
//!
//! Defines the [`SettingsStore`] trait and its implementations: MongoDB
//! (feature `mongodb`), a JSON file for local development, and an
//! in-process store for tests and embedding.

pub mod file_store;
pub mod memory_store;

#[cfg(feature = "mongodb")]
pub mod mongodb_store;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::settings::GeneralSettings;

// async_trait is required here because SettingsStore is used as Arc<dyn SettingsStore>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Read one document. `Ok(None)` means the document does not exist.
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<GeneralSettings>, FetchError>;
}
