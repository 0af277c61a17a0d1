//! Port for settings-document persistence.

use async_trait::async_trait;

use crate::domain::settings::SettingsDocument;
use crate::domain::DomainError;

/// Generic key -> JSON-document store, one document per key.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<SettingsDocument>, DomainError>;

    /// Create or overwrite the document for `key` (no history).
    async fn upsert(&self, key: &str, data: serde_json::Value) -> Result<(), DomainError>;
}
