//! PostgreSQL implementation of `SettingsRepository`.
//!
//! One row per key; the payload is an opaque JSONB document overwritten as a
//! whole on every save.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::settings::SettingsDocument;
use crate::domain::DomainError;
use crate::ports::SettingsRepository;

use super::connection::ConnectionManager;

pub struct PostgresSettingsRepository {
    conn: Arc<ConnectionManager>,
}

impl PostgresSettingsRepository {
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
struct SettingsRow {
    key: String,
    data: serde_json::Value,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for SettingsDocument {
    fn from(row: SettingsRow) -> Self {
        SettingsDocument {
            key: row.key,
            data: row.data,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<SettingsDocument>, DomainError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, SettingsRow>(
            "SELECT key, data, updated_at FROM settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&pool)
        .await?;
        Ok(row.map(SettingsDocument::from))
    }

    async fn upsert(&self, key: &str, data: serde_json::Value) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::query(
            "INSERT INTO settings (key, data, updated_at) VALUES ($1, $2, $3) \
             ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at",
        )
        .bind(key)
        .bind(data)
        .bind(Utc::now())
        .execute(&pool)
        .await?;
        Ok(())
    }
}
