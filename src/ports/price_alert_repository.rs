//! Port for price-alert persistence.

use async_trait::async_trait;

use crate::domain::price_alert::PriceAlert;
use crate::domain::DomainError;

#[async_trait]
pub trait PriceAlertRepository: Send + Sync {
    async fn insert(&self, alert: &PriceAlert) -> Result<(), DomainError>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<PriceAlert>, DomainError>;

    /// Remove the alert for (`user_id`, `product_id`). Returns whether a row
    /// was deleted.
    async fn delete(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError>;
}
