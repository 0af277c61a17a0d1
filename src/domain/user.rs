//! User entity and projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Role::Customer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A saved delivery address. Stored as a JSONB sub-document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub title: String,
    pub city: String,
    pub district: String,
    pub content: String,
    #[serde(default)]
    pub zip_code: String,
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Trimmed and lowercased; see [`normalize_email`].
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub addresses: Vec<Address>,
    /// Favorited product ids.
    pub favorites: Vec<String>,
    /// Order ids placed by this account.
    pub orders: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Caller-safe projection. The password hash never leaves the service.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            role: self.role,
            addresses: self.addresses.clone(),
            favorites: self.favorites.clone(),
            orders: self.orders.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// Sanitized user view returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub addresses: Vec<Address>,
    pub favorites: Vec<String>,
    pub orders: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Canonical form used for every lookup and uniqueness check.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
