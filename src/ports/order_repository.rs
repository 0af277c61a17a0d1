//! Port for order persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::{Order, OrderStatus};
use crate::domain::DomainError;

/// Persistence contract for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Locate an order by whatever identifier an update request carries:
    /// the internal id or the public order number.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Order>, DomainError>;

    /// Case-insensitive lookup by public order number (tracking surface).
    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError>;

    /// Apply a status change and, when present, a tracking number. The item
    /// list and order number are immutable.
    async fn apply_update(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<(), DomainError>;

    /// List orders, optionally filtered by owning user, newest first.
    async fn list(&self, user_id: Option<&str>) -> Result<Vec<Order>, DomainError>;
}
