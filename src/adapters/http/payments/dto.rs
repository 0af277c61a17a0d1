//! HTTP DTOs for the payment token endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItemRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTokenHttpRequest {
    #[serde(alias = "orderNumber")]
    pub merchant_oid: String,
    pub email: String,
    pub amount: f64,
    pub basket: Vec<BasketItemRequest>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_address: String,
    #[serde(default)]
    pub user_phone: String,
    #[serde(default)]
    pub no_installment: bool,
    #[serde(default)]
    pub max_installment: u8,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentTokenResponse {
    pub status: &'static str,
    pub token: String,
}
