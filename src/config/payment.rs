//! Payment configuration (PayTR)
//!
//! Merchant credentials configured here are the *fallback*: the admin-managed
//! settings document takes precedence at request time. All three of id, key
//! and salt must be present for the fallback to be usable.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// PayTR merchant id (fallback)
    pub merchant_id: Option<String>,

    /// PayTR merchant key (fallback)
    pub merchant_key: Option<SecretString>,

    /// PayTR merchant salt (fallback)
    pub merchant_salt: Option<SecretString>,

    /// Token endpoint of the gateway
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Redirect URL after a successful payment
    #[serde(default = "default_ok_url")]
    pub ok_url: String,

    /// Redirect URL after a failed payment
    #[serde(default = "default_fail_url")]
    pub fail_url: String,

    /// Payment page timeout in minutes, sent to the gateway
    #[serde(default = "default_timeout_limit")]
    pub timeout_limit: u32,

    /// Request test-mode tokens from the gateway
    #[serde(default)]
    pub test_mode: bool,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.gateway_url.starts_with("https://") {
            return Err(ValidationError::GatewayUrlMustBeHttps);
        }

        // Fallback credentials are optional, but partial credentials are a
        // deployment mistake worth failing fast on.
        let present = [
            self.merchant_id.is_some(),
            self.merchant_key.is_some(),
            self.merchant_salt.is_some(),
        ];
        let count = present.iter().filter(|p| **p).count();
        if count != 0 && count != 3 {
            return Err(ValidationError::PartialMerchantCredentials);
        }

        if let Some(key) = &self.merchant_key {
            if key.expose_secret().is_empty() {
                return Err(ValidationError::MissingRequired("PAYTR merchant key"));
            }
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            merchant_id: None,
            merchant_key: None,
            merchant_salt: None,
            gateway_url: default_gateway_url(),
            ok_url: default_ok_url(),
            fail_url: default_fail_url(),
            timeout_limit: default_timeout_limit(),
            test_mode: false,
        }
    }
}

fn default_gateway_url() -> String {
    "https://www.paytr.com/odeme/api/get-token".to_string()
}

fn default_ok_url() -> String {
    "https://shopfront.dev/payment/success".to_string()
}

fn default_fail_url() -> String {
    "https://shopfront.dev/payment/failed".to_string()
}

fn default_timeout_limit() -> u32 {
    30
}
