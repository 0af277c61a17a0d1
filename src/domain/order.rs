//! Order entity, status lifecycle, and the public masked-tracking view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle status.
///
/// Legal transitions: `pending -> processing -> shipped -> delivered | completed`,
/// with `cancelled` reachable from `pending` and `processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether `next` is a legal successor in the lifecycle. The update path
    /// does not enforce this (admin tooling may correct mistakes), but
    /// callers that care can check.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Shipped, Completed)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }
}

/// A purchased line item. Stored as a JSONB sub-document; the item list is
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// A placed order.
///
/// `order_no` is the single canonical public identifier, assigned once at
/// creation and never reassigned. The legacy alias field from earlier schema
/// versions exists only at the API boundary.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
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

impl Order {
    /// Reduced projection for the unauthenticated tracking endpoint.
    pub fn to_tracked(&self) -> TrackedOrder {
        TrackedOrder {
            order_no: self.order_no.clone(),
            status: self.status,
            customer_name: mask_name(&self.customer_name),
            amount: self.amount,
            items: self.items.clone(),
            tracking_number: self.tracking_number.clone(),
            created_at: self.created_at,
        }
    }
}

/// What the public tracking endpoint exposes: no address, no email, and a
/// masked customer name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrder {
    pub order_no: String,
    pub status: OrderStatus,
    pub customer_name: String,
    pub amount: f64,
    pub items: Vec<OrderItem>,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Display-safe masking of a personal name: one leading letter per outer
/// token, the rest replaced. "John Doe" -> "J*** D***"; "Mehmet" -> "M***".
/// Middle tokens are dropped entirely.
pub fn mask_name(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    let first = tokens.next();
    let last = tokens.last();

    match (first, last) {
        (Some(first), Some(last)) => format!("{}*** {}***", initial(first), initial(last)),
        (Some(only), None) => format!("{}***", initial(only)),
        (None, _) => "***".to_string(),
    }
}

fn initial(token: &str) -> String {
    token.chars().next().map(String::from).unwrap_or_default()
}
