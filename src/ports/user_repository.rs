//! Port for user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::{Address, User};
use crate::domain::DomainError;

/// Partial profile update. `None` fields are left untouched in storage.
/// Only allow-listed fields appear here; email and role are not mutable
/// through the profile-update flow.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub favorites: Option<Vec<String>>,
    pub addresses: Option<Vec<Address>>,
    pub orders: Option<Vec<String>>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.favorites.is_none()
            && self.addresses.is_none()
            && self.orders.is_none()
            && self.password_hash.is_none()
    }
}

/// Persistence contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lookup by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Insert a new account. A unique-violation on email surfaces as a
    /// conflict error.
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Apply a partial update; fields not present in `update` stay untouched.
    async fn apply_update(&self, id: Uuid, update: UserUpdate) -> Result<(), DomainError>;

    /// Stamp the last successful login. Called from a detached task; failures
    /// are the caller's to log.
    async fn stamp_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
}
