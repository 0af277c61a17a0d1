//! Payment token issuance: credential resolution and amount shaping in front
//! of the gateway adapter.

use secrecy::SecretString;
use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::domain::DomainError;
use crate::ports::{
    BasketLine, GatewayError, MerchantCredentials, PaymentGateway, PaymentTokenRequest,
};
use crate::services::settings::SettingsService;

/// Checkout input, already shaped by the HTTP layer. Amounts are in major
/// units (lira).
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub merchant_oid: String,
    pub email: String,
    pub amount: f64,
    pub user_ip: String,
    pub user_name: String,
    pub user_address: String,
    pub user_phone: String,
    pub basket: Vec<CheckoutItem>,
    pub no_installment: bool,
    pub max_installment: u8,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckoutItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    settings: Arc<SettingsService>,
    fallback: PaymentConfig,
}

impl PaymentService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        settings: Arc<SettingsService>,
        fallback: PaymentConfig,
    ) -> Self {
        Self {
            gateway,
            settings,
            fallback,
        }
    }

    /// Issue a gateway token for a checkout. Credentials come from the stored
    /// settings document first, then the deployment configuration; missing
    /// credentials are a hard failure, never a silent test-mode fallback.
    pub async fn issue_token(&self, request: CheckoutRequest) -> Result<String, DomainError> {
        if request.merchant_oid.trim().is_empty() {
            return Err(DomainError::validation("Order id is required"));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(DomainError::validation("Payment amount must be positive"));
        }
        if request.amount > MAX_PAYMENT_AMOUNT {
            return Err(DomainError::validation("Payment amount is too large"));
        }
        if request.basket.is_empty() {
            return Err(DomainError::validation("Basket cannot be empty"));
        }

        let credentials = self.resolve_credentials().await?;

        let token_request = PaymentTokenRequest {
            merchant_oid: request.merchant_oid,
            email: request.email,
            payment_amount: to_minor_units(request.amount),
            user_ip: request.user_ip,
            user_name: request.user_name,
            user_address: request.user_address,
            user_phone: request.user_phone,
            basket: request
                .basket
                .into_iter()
                .map(|item| BasketLine {
                    name: item.name,
                    price: format!("{:.2}", item.price),
                    quantity: item.quantity,
                })
                .collect(),
            no_installment: request.no_installment as u8,
            max_installment: request.max_installment,
            currency: request.currency.unwrap_or_else(|| "TL".to_string()),
        };

        self.gateway
            .issue_token(&credentials, &token_request)
            .await
            .map_err(|err| match err {
                GatewayError::Rejected(reason) => DomainError::gateway_rejected(reason),
                GatewayError::Network(reason) => {
                    tracing::error!(error = %reason, "Payment gateway unreachable");
                    DomainError::store_unavailable()
                }
                GatewayError::InvalidResponse(reason) => DomainError::internal(format!(
                    "Payment gateway returned an unreadable response: {}",
                    reason
                )),
            })
    }

    /// Settings document first, configuration fallback second. Partial
    /// credentials from either source are treated as absent for that source.
    async fn resolve_credentials(&self) -> Result<MerchantCredentials, DomainError> {
        let stored = self.settings.paytr_settings().await?;
        if !stored.merchant_id.is_empty()
            && !stored.merchant_key.is_empty()
            && !stored.merchant_salt.is_empty()
        {
            return Ok(MerchantCredentials {
                merchant_id: stored.merchant_id,
                merchant_key: SecretString::new(stored.merchant_key),
                merchant_salt: SecretString::new(stored.merchant_salt),
                test_mode: stored.test_mode,
            });
        }

        match (
            &self.fallback.merchant_id,
            &self.fallback.merchant_key,
            &self.fallback.merchant_salt,
        ) {
            (Some(id), Some(key), Some(salt)) => Ok(MerchantCredentials {
                merchant_id: id.clone(),
                merchant_key: key.clone(),
                merchant_salt: salt.clone(),
                test_mode: self.fallback.test_mode,
            }),
            _ => Err(DomainError::internal(
                "Payment gateway credentials are not configured",
            )),
        }
    }
}

/// Upper bound in lira; the kuruş conversion below must stay integer-exact.
const MAX_PAYMENT_AMOUNT: f64 = 10_000_000.0;

/// Lira to kuruş, rounded to the nearest minor unit.
fn to_minor_units(amount: f64) -> String {
    ((amount * 100.0).round() as i64).to_string()
}
