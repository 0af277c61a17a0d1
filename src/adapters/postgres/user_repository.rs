//! PostgreSQL implementation of `UserRepository`.
//!
//! Schema-flexible sub-documents (addresses, favorites, order ids) live in
//! JSONB columns; scalar fields are proper columns so the email uniqueness
//! index can exist at the store level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{Role, User};
use crate::domain::DomainError;
use crate::ports::{UserRepository, UserUpdate};

use super::connection::ConnectionManager;

pub struct PostgresUserRepository {
    conn: Arc<ConnectionManager>,
}

impl PostgresUserRepository {
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
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    phone: Option<String>,
    role: String,
    addresses: serde_json::Value,
    favorites: serde_json::Value,
    orders: serde_json::Value,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| DomainError::internal(format!("Invalid role value: {}", row.role)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
            phone: row.phone,
            role,
            addresses: serde_json::from_value(row.addresses)
                .map_err(|e| DomainError::internal(format!("Corrupt addresses document: {}", e)))?,
            favorites: serde_json::from_value(row.favorites)
                .map_err(|e| DomainError::internal(format!("Corrupt favorites document: {}", e)))?,
            orders: serde_json::from_value(row.orders)
                .map_err(|e| DomainError::internal(format!("Corrupt orders document: {}", e)))?,
            created_at: row.created_at,
            last_login: row.last_login,
        })
    }
}

const SELECT_USER: &str = "SELECT id, email, password_hash, name, phone, role, addresses, \
                           favorites, orders, created_at, last_login FROM users";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::query(
            "INSERT INTO users \
             (id, email, password_hash, name, phone, role, addresses, favorites, orders, created_at, last_login) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .bind(serde_json::to_value(&user.addresses).unwrap_or_default())
        .bind(serde_json::to_value(&user.favorites).unwrap_or_default())
        .bind(serde_json::to_value(&user.orders).unwrap_or_default())
        .bind(user.created_at)
        .bind(user.last_login)
        .execute(&pool)
        .await?;
        Ok(())
    }

    async fn apply_update(&self, id: Uuid, update: UserUpdate) -> Result<(), DomainError> {
        if update.is_empty() {
            return Ok(());
        }
        let pool = self.pool().await?;

        let mut builder = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = update.name {
            fields.push("name = ");
            fields.push_bind_unseparated(name);
        }
        if let Some(favorites) = update.favorites {
            fields.push("favorites = ");
            fields.push_bind_unseparated(serde_json::to_value(favorites).unwrap_or_default());
        }
        if let Some(addresses) = update.addresses {
            fields.push("addresses = ");
            fields.push_bind_unseparated(serde_json::to_value(addresses).unwrap_or_default());
        }
        if let Some(orders) = update.orders {
            fields.push("orders = ");
            fields.push_bind_unseparated(serde_json::to_value(orders).unwrap_or_default());
        }
        if let Some(password_hash) = update.password_hash {
            fields.push("password_hash = ");
            fields.push_bind_unseparated(password_hash);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(&pool).await.map_err(DomainError::from)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User not found"));
        }
        Ok(())
    }

    async fn stamp_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let pool = self.pool().await?;
        sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&pool)
            .await?;
        Ok(())
    }
}
