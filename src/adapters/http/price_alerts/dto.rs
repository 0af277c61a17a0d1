//! HTTP DTOs for price alerts.

use serde::{Deserialize, Serialize};

use crate::domain::price_alert::PriceAlert;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceAlertRequest {
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePriceAlertQuery {
    pub product_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceAlertResponse {
    pub success: bool,
    pub data: PriceAlert,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceAlertListResponse {
    pub success: bool,
    pub data: Vec<PriceAlert>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
}
