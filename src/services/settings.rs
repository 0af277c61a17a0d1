//! Generic settings documents plus the typed admin views built on them.

use std::sync::Arc;

use crate::domain::settings::{is_public_settings_key, PaytrSettings, PAYTR_SETTINGS_KEY};
use crate::domain::DomainError;
use crate::ports::SettingsRepository;

pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    /// Public read path. Credential documents are refused outright; a missing
    /// document reads as an empty object so clients need no 404 handling.
    pub async fn get_public(&self, key: &str) -> Result<serde_json::Value, DomainError> {
        if !is_public_settings_key(key) {
            return Err(DomainError::forbidden("This settings key is not public"));
        }
        self.read(key).await
    }

    /// Admin read path, no denylist.
    pub async fn get(&self, key: &str) -> Result<serde_json::Value, DomainError> {
        self.read(key).await
    }

    /// Create or overwrite the document for `key`.
    pub async fn put(&self, key: &str, data: serde_json::Value) -> Result<(), DomainError> {
        if key.trim().is_empty() {
            return Err(DomainError::validation("Settings key is required"));
        }
        self.settings.upsert(key, data).await?;
        tracing::info!(key, "Settings document updated");
        Ok(())
    }

    /// Typed read of the payment-gateway credential document. Absent or
    /// partial documents come back with empty fields.
    pub async fn paytr_settings(&self) -> Result<PaytrSettings, DomainError> {
        let data = self.read(PAYTR_SETTINGS_KEY).await?;
        serde_json::from_value(data)
            .map_err(|e| DomainError::internal(format!("Malformed payment settings: {}", e)))
    }

    pub async fn put_paytr_settings(&self, settings: &PaytrSettings) -> Result<(), DomainError> {
        let data = serde_json::to_value(settings)
            .map_err(|e| DomainError::internal(format!("Settings serialization failed: {}", e)))?;
        self.put(PAYTR_SETTINGS_KEY, data).await
    }

    async fn read(&self, key: &str) -> Result<serde_json::Value, DomainError> {
        Ok(self
            .settings
            .get(key)
            .await?
            .map(|doc| doc.data)
            .unwrap_or_else(|| serde_json::json!({})))
    }
}
