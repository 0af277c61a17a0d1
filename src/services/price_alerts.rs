//! Price alerts: create, list and delete for the authenticated user.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::price_alert::PriceAlert;
use crate::domain::DomainError;
use crate::ports::PriceAlertRepository;

pub struct PriceAlertService {
    alerts: Arc<dyn PriceAlertRepository>,
}

impl PriceAlertService {
    pub fn new(alerts: Arc<dyn PriceAlertRepository>) -> Self {
        Self { alerts }
    }

    /// Register an alert. Creating the same (user, product) pair twice is a
    /// no-op at the store level.
    pub async fn create(&self, user_id: &str, product_id: &str) -> Result<PriceAlert, DomainError> {
        if product_id.trim().is_empty() {
            return Err(DomainError::validation("Product id is required"));
        }
        let alert = PriceAlert {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            product_id: product_id.trim().to_string(),
            created_at: Utc::now(),
        };
        self.alerts.insert(&alert).await?;
        Ok(alert)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<PriceAlert>, DomainError> {
        self.alerts.list_for_user(user_id).await
    }

    pub async fn delete(&self, user_id: &str, product_id: &str) -> Result<(), DomainError> {
        let deleted = self.alerts.delete(user_id, product_id).await?;
        if !deleted {
            return Err(DomainError::not_found("Price alert not found"));
        }
        Ok(())
    }
}
