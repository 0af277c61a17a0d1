//! HTTP DTOs for settings endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::settings::PaytrSettings;

/// Body of `POST /api/save-settings`. `filename` is the historical name of
/// the settings key.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(alias = "key")]
    pub filename: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePaytrSettingsRequest {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub merchant_key: String,
    #[serde(default)]
    pub merchant_salt: String,
    #[serde(default)]
    pub test_mode: bool,
}

impl From<SavePaytrSettingsRequest> for PaytrSettings {
    fn from(req: SavePaytrSettingsRequest) -> Self {
        Self {
            merchant_id: req.merchant_id,
            merchant_key: req.merchant_key,
            merchant_salt: req.merchant_salt,
            test_mode: req.test_mode,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedResponse {
    pub success: bool,
}

impl SavedResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
