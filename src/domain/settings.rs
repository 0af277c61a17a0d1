//! Settings documents: one opaque JSON payload per configuration domain,
//! with typed structures at the boundary for the domains the service itself
//! consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the payment-gateway credential document. Denied on the public
/// settings read path.
pub const PAYTR_SETTINGS_KEY: &str = "paytrSettings";

/// Key of the notification routing document.
pub const NOTIFICATION_SETTINGS_KEY: &str = "notificationSettings";

/// Keys the public `GET /api/settings/:key` path refuses to serve. The check
/// runs before the generic read logic; the storage layer itself stays
/// unrestricted.
pub const PROTECTED_SETTINGS_KEYS: &[&str] = &[PAYTR_SETTINGS_KEY];

/// Whether a key may be served on the public read path.
pub fn is_public_settings_key(key: &str) -> bool {
    !PROTECTED_SETTINGS_KEYS.contains(&key)
}

/// A stored configuration document. Exactly one per key (upsert semantics,
/// no history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub key: String,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Typed view of the payment-gateway credential document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaytrSettings {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub merchant_key: String,
    #[serde(default)]
    pub merchant_salt: String,
    #[serde(default)]
    pub test_mode: bool,
}

/// Typed view of the notification routing document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Recipients for admin order alerts. Empty means "fall back to the
    /// configured default".
    #[serde(default)]
    pub admin_emails: Vec<String>,
}
