//! PostgreSQL implementation of `OrderRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{Order, OrderStatus};
use crate::domain::DomainError;
use crate::ports::OrderRepository;

use super::connection::ConnectionManager;

pub struct PostgresOrderRepository {
    conn: Arc<ConnectionManager>,
}

impl PostgresOrderRepository {
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
struct OrderRow {
    id: Uuid,
    order_no: String,
    user_id: Option<String>,
    customer_name: String,
    customer_email: String,
    items: serde_json::Value,
    amount: f64,
    status: String,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status)
            .ok_or_else(|| DomainError::internal(format!("Invalid status value: {}", row.status)))?;

        Ok(Order {
            id: row.id,
            order_no: row.order_no,
            user_id: row.user_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            items: serde_json::from_value(row.items)
                .map_err(|e| DomainError::internal(format!("Corrupt items document: {}", e)))?,
            amount: row.amount,
            status,
            tracking_number: row.tracking_number,
            created_at: row.created_at,
        })
    }
}

const SELECT_ORDER: &str = "SELECT id, order_no, user_id, customer_name, customer_email, items, \
                            amount, status, tracking_number, created_at FROM orders";

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::query(
            "INSERT INTO orders \
             (id, order_no, user_id, customer_name, customer_email, items, amount, status, tracking_number, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(order.id)
        .bind(&order.order_no)
        .bind(&order.user_id)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(serde_json::to_value(&order.items).unwrap_or_default())
        .bind(order.amount)
        .bind(order.status.as_str())
        .bind(&order.tracking_number)
        .bind(order.created_at)
        .execute(&pool)
        .await?;
        Ok(())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Order>, DomainError> {
        let pool = self.pool().await?;
        // An update request may carry the internal id or the public order
        // number; accept both.
        let row = match Uuid::parse_str(identifier) {
            Ok(id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{} WHERE id = $1 OR LOWER(order_no) = LOWER($2) LIMIT 1",
                    SELECT_ORDER
                ))
                .bind(id)
                .bind(identifier)
                .fetch_optional(&pool)
                .await?
            }
            Err(_) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{} WHERE LOWER(order_no) = LOWER($1) LIMIT 1",
                    SELECT_ORDER
                ))
                .bind(identifier)
                .fetch_optional(&pool)
                .await?
            }
        };
        row.map(Order::try_from).transpose()
    }

    async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "{} WHERE LOWER(order_no) = LOWER($1) LIMIT 1",
            SELECT_ORDER
        ))
        .bind(order_no)
        .fetch_optional(&pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    async fn apply_update(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        let result = sqlx::query(
            "UPDATE orders SET status = $1, tracking_number = COALESCE($2, tracking_number) \
             WHERE id = $3",
        )
        .bind(status.as_str())
        .bind(tracking_number)
        .bind(id)
        .execute(&pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Order not found"));
        }
        Ok(())
    }

    async fn list(&self, user_id: Option<&str>) -> Result<Vec<Order>, DomainError> {
        let pool = self.pool().await?;
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{} WHERE user_id = $1 ORDER BY created_at DESC",
                    SELECT_ORDER
                ))
                .bind(user_id)
                .fetch_all(&pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{} ORDER BY created_at DESC",
                    SELECT_ORDER
                ))
                .fetch_all(&pool)
                .await?
            }
        };
        rows.into_iter().map(Order::try_from).collect()
    }
}
