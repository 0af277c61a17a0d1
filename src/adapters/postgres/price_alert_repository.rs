//! PostgreSQL implementation of `PriceAlertRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::price_alert::PriceAlert;
use crate::domain::DomainError;
use crate::ports::PriceAlertRepository;

use super::connection::ConnectionManager;

pub struct PostgresPriceAlertRepository {
    conn: Arc<ConnectionManager>,
}

impl PostgresPriceAlertRepository {
    pub fn new(conn: Arc<ConnectionManager>) -> Self {
        Self { conn }
    }

    async fn pool(&self) -> Result<sqlx::PgPool, DomainError> {
        self.conn
            .acquire()
            .await
            .ok_or_else(DomainError::store_unavailable)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PriceAlertRow {
    id: Uuid,
    user_id: String,
    product_id: String,
    created_at: DateTime<Utc>,
}

impl From<PriceAlertRow> for PriceAlert {
    fn from(row: PriceAlertRow) -> Self {
        PriceAlert {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PriceAlertRepository for PostgresPriceAlertRepository {
    async fn insert(&self, alert: &PriceAlert) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::query(
            "INSERT INTO price_alerts (id, user_id, product_id, created_at) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(alert.id)
        .bind(&alert.user_id)
        .bind(&alert.product_id)
        .bind(alert.created_at)
        .execute(&pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<PriceAlert>, DomainError> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, PriceAlertRow>(
            "SELECT id, user_id, product_id, created_at FROM price_alerts \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await?;
        Ok(rows.into_iter().map(PriceAlert::from).collect())
    }

    async fn delete(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            "DELETE FROM price_alerts WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
