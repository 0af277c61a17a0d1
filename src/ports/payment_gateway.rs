//! Port for the external payment gateway's token endpoint.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Resolved merchant credentials. All three values are required before a
/// token request may be attempted.
#[derive(Clone)]
pub struct MerchantCredentials {
    pub merchant_id: String,
    pub merchant_key: SecretString,
    pub merchant_salt: SecretString,
    pub test_mode: bool,
}

/// One basket line as the gateway expects it: display name, unit price as a
/// decimal string, quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketLine {
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

/// Everything the gateway needs besides credentials and callback wiring.
#[derive(Debug, Clone)]
pub struct PaymentTokenRequest {
    /// Merchant order id; must be unique per attempt on the gateway side.
    pub merchant_oid: String,
    pub email: String,
    /// Payment amount in minor units (kuruş), already stringified.
    pub payment_amount: String,
    pub user_ip: String,
    pub user_name: String,
    pub user_address: String,
    pub user_phone: String,
    pub basket: Vec<BasketLine>,
    pub no_installment: u8,
    pub max_installment: u8,
    pub currency: String,
}

/// Errors from the token endpoint.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway processed the request and said no; its reason is passed
    /// through to the caller.
    #[error("Gateway rejected the token request: {0}")]
    Rejected(String),

    #[error("Gateway unreachable: {0}")]
    Network(String),

    #[error("Gateway returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// Token issuance contract. The adapter owns the wire protocol, including
/// the exact-order signature.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn issue_token(
        &self,
        credentials: &MerchantCredentials,
        request: &PaymentTokenRequest,
    ) -> Result<String, GatewayError>;
}
