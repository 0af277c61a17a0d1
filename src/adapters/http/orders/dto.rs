//! HTTP DTOs for order endpoints.
//!
//! The wire format still accepts the legacy `orderNumber` field name from
//! earlier schema versions; internally there is exactly one identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderItem, OrderStatus, TrackedOrder};

/// Creation body. A client-supplied order number is kept (checkout flows that
/// request a payment token first already hold the `merchant_oid`); one is
/// generated only when absent. The initial status defaults likewise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub amount: f64,
    #[serde(default, alias = "orderNumber")]
    pub order_no: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Status update. `orderId` may carry the internal id or the public order
/// number; `orderNumber` is the legacy spelling of the same thing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(alias = "orderNumber")]
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOrderRequest {
    #[serde(alias = "orderNumber")]
    pub order_no: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub order_no: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub amount: f64,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            order_no: order.order_no,
            user_id: order.user_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            items: order.items,
            amount: order.amount,
            status: order.status,
            tracking_number: order.tracking_number,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDataResponse {
    pub success: bool,
    pub data: OrderResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub data: Vec<OrderResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackedOrderResponse {
    pub success: bool,
    pub data: TrackedOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_accepts_the_legacy_alias() {
        let parsed: UpdateOrderRequest = serde_json::from_value(serde_json::json!({
            "orderNumber": "SF-1001",
            "status": "shipped"
        }))
        .unwrap();
        assert_eq!(parsed.order_id, "SF-1001");

        let parsed: UpdateOrderRequest = serde_json::from_value(serde_json::json!({
            "orderId": "SF-1001",
            "status": "shipped"
        }))
        .unwrap();
        assert_eq!(parsed.order_id, "SF-1001");
    }

    #[test]
    fn create_request_carries_a_supplied_order_no() {
        let parsed: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "customerName": "Mehmet Kaya",
            "customerEmail": "mehmet@example.com",
            "items": [{ "name": "Kahve Makinesi", "price": 149.9, "quantity": 1 }],
            "amount": 149.9,
            "orderNo": "CUSTOM-1"
        }))
        .unwrap();
        assert_eq!(parsed.order_no.as_deref(), Some("CUSTOM-1"));

        let parsed: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "customerName": "Mehmet Kaya",
            "customerEmail": "mehmet@example.com",
            "items": [{ "name": "Kahve Makinesi", "price": 149.9, "quantity": 1 }],
            "amount": 149.9,
            "orderNumber": "CUSTOM-1"
        }))
        .unwrap();
        assert_eq!(parsed.order_no.as_deref(), Some("CUSTOM-1"));
        assert!(parsed.status.is_none());
    }

    #[test]
    fn track_request_accepts_both_spellings() {
        let parsed: TrackOrderRequest =
            serde_json::from_value(serde_json::json!({ "orderNo": "SF-1" })).unwrap();
        assert_eq!(parsed.order_no, "SF-1");

        let parsed: TrackOrderRequest =
            serde_json::from_value(serde_json::json!({ "orderNumber": "SF-1" })).unwrap();
        assert_eq!(parsed.order_no, "SF-1");
    }
}
