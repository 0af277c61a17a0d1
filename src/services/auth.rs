//! Account registration, login, profile and update flows.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{normalize_email, Address, Role, User, UserProfile};
use crate::domain::DomainError;
use crate::ports::{AuthClaims, TokenAuthority, UserRepository, UserUpdate};
use crate::services::notifications::{Notification, NotificationDispatcher};

/// Registration input, already shaped by the HTTP layer.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

/// Allow-listed profile mutations. Anything else in the request body is
/// ignored, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub favorites: Option<Vec<String>>,
    pub addresses: Option<Vec<Address>>,
    pub orders: Option<Vec<String>>,
    pub password: Option<String>,
}

/// Token plus sanitized user, returned by register and login.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub token: String,
    pub user: UserProfile,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenAuthority>,
    dispatcher: Arc<NotificationDispatcher>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenAuthority>,
        dispatcher: Arc<NotificationDispatcher>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            tokens,
            dispatcher,
            bcrypt_cost,
        }
    }

    /// Create an account and issue its first token.
    ///
    /// The existence check and the insert are two separate store operations;
    /// the unique index on email backstops the race window between them, and
    /// both paths surface the same conflict error.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSuccess, DomainError> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() || request.name.trim().is_empty() {
            return Err(DomainError::validation(
                "Email, password and name are required",
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("This email is already registered"));
        }

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name: request.name.trim().to_string(),
            phone: request.phone,
            role: Role::Customer,
            addresses: request.address.into_iter().collect(),
            favorites: Vec::new(),
            orders: Vec::new(),
            created_at: Utc::now(),
            last_login: None,
        };

        self.users.insert(&user).await?;
        tracing::info!(user_id = %user.id, "Account registered");

        let token = self.issue_for(&user)?;
        self.dispatcher.send_detached(Notification::Welcome {
            to: user.email.clone(),
            name: user.name.clone(),
        });

        Ok(AuthSuccess {
            token,
            user: user.to_profile(),
        })
    }

    /// Verify credentials and issue a token. The same error covers an unknown
    /// email and a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, DomainError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(DomainError::bad_credentials)?;

        let matches = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !matches {
            return Err(DomainError::bad_credentials());
        }

        let token = self.issue_for(&user)?;

        // Stamp the login time off the response path.
        let users = Arc::clone(&self.users);
        let user_id = user.id;
        tokio::spawn(async move {
            if let Err(err) = users.stamp_last_login(user_id, Utc::now()).await {
                tracing::warn!(user_id = %user_id, error = %err, "Failed to stamp last login");
            }
        });

        Ok(AuthSuccess {
            token,
            user: user.to_profile(),
        })
    }

    /// Load the profile behind a verified token.
    pub async fn profile(&self, claims: &AuthClaims) -> Result<UserProfile, DomainError> {
        let user = self.load_user(claims).await?;
        Ok(user.to_profile())
    }

    /// Apply an allow-listed partial update. A supplied password is re-hashed;
    /// fields not supplied stay untouched in storage.
    pub async fn update(
        &self,
        claims: &AuthClaims,
        update: ProfileUpdate,
    ) -> Result<(), DomainError> {
        let user = self.load_user(claims).await?;

        let password_hash = match update.password {
            Some(password) if !password.is_empty() => Some(
                bcrypt::hash(&password, self.bcrypt_cost)
                    .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))?,
            ),
            Some(_) => return Err(DomainError::validation("Password cannot be empty")),
            None => None,
        };

        self.users
            .apply_update(
                user.id,
                UserUpdate {
                    name: update.name,
                    favorites: update.favorites,
                    addresses: update.addresses,
                    orders: update.orders,
                    password_hash,
                },
            )
            .await
    }

    async fn load_user(&self, claims: &AuthClaims) -> Result<User, DomainError> {
        let id = Uuid::parse_str(&claims.user_id)
            .map_err(|_| DomainError::authentication("Invalid or expired token"))?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }

    fn issue_for(&self, user: &User) -> Result<String, DomainError> {
        self.tokens.issue(&AuthClaims {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtAuthenticator;
    use crate::adapters::email::MockMailTransport;
    use crate::config::AuthConfig;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use secrecy::SecretString;
    use std::sync::Mutex;

    struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, user: &User) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            // Mirrors the store-level unique index.
            if users.iter().any(|u| u.email == user.email) {
                return Err(DomainError::conflict("Record already exists"));
            }
            users.push(user.clone());
            Ok(())
        }

        async fn apply_update(&self, id: Uuid, update: UserUpdate) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| DomainError::not_found("User not found"))?;
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(favorites) = update.favorites {
                user.favorites = favorites;
            }
            if let Some(addresses) = update.addresses {
                user.addresses = addresses;
            }
            if let Some(orders) = update.orders {
                user.orders = orders;
            }
            if let Some(hash) = update.password_hash {
                user.password_hash = hash;
            }
            Ok(())
        }

        async fn stamp_last_login(
            &self,
            id: Uuid,
            at: DateTime<Utc>,
        ) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.id == id) {
                user.last_login = Some(at);
            }
            Ok(())
        }
    }

    fn service() -> (AuthService, Arc<MockMailTransport>) {
        let transport = Arc::new(MockMailTransport::new());
        let tokens = Arc::new(JwtAuthenticator::new(&AuthConfig {
            jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".to_string()),
            ..Default::default()
        }));
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            tokens,
            Arc::new(NotificationDispatcher::new(transport.clone())),
            // Minimum bcrypt cost, to keep the suite fast.
            4,
        );
        (service, transport)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            name: "Ayşe Yılmaz".to_string(),
            phone: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn register_issues_a_verifiable_token() {
        let (service, _) = service();
        let success = service.register(register_request("a@b.com")).await.unwrap();
        assert_eq!(success.user.email, "a@b.com");
        assert!(!success.token.is_empty());
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let (service, _) = service();
        let mut request = register_request("a@b.com");
        request.password = String::new();
        let err = service.register(request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let (service, _) = service();
        service.register(register_request("Ayse@Example.com")).await.unwrap();
        let err = service
            .register(register_request("  AYSE@example.COM "))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn login_with_wrong_password_matches_unknown_email_error() {
        let (service, _) = service();
        service.register(register_request("a@b.com")).await.unwrap();

        let wrong_password = service.login("a@b.com", "nope").await.unwrap_err();
        let unknown_email = service.login("ghost@b.com", "hunter22").await.unwrap_err();
        assert_eq!(wrong_password.code(), ErrorCode::Authentication);
        assert_eq!(wrong_password.message(), unknown_email.message());
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_credentials() {
        let (service, _) = service();
        service.register(register_request("a@b.com")).await.unwrap();
        let success = service.login("A@B.com", "hunter22").await.unwrap();
        assert_eq!(success.user.email, "a@b.com");
    }

    #[tokio::test]
    async fn register_dispatches_a_welcome_email() {
        let (service, transport) = service();
        service.register(register_request("a@b.com")).await.unwrap();
        // Detached send; give the task a moment.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(transport.sent_count(), 1);
        assert!(transport.sent()[0].subject.contains("Welcome"));
    }

    #[tokio::test]
    async fn update_rehashes_a_supplied_password() {
        let (service, _) = service();
        let success = service.register(register_request("a@b.com")).await.unwrap();
        let claims = AuthClaims {
            user_id: success.user.id.clone(),
            email: success.user.email.clone(),
            role: Role::Customer,
        };

        service
            .update(
                &claims,
                ProfileUpdate {
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(service.login("a@b.com", "hunter22").await.is_err());
        assert!(service.login("a@b.com", "new-secret").await.is_ok());
    }

    #[tokio::test]
    async fn update_only_touches_supplied_fields() {
        let (service, _) = service();
        let success = service.register(register_request("a@b.com")).await.unwrap();
        let claims = AuthClaims {
            user_id: success.user.id.clone(),
            email: success.user.email.clone(),
            role: Role::Customer,
        };

        service
            .update(
                &claims,
                ProfileUpdate {
                    favorites: Some(vec!["prod-1".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let profile = service.profile(&claims).await.unwrap();
        assert_eq!(profile.favorites, vec!["prod-1".to_string()]);
        assert_eq!(profile.name, "Ayşe Yılmaz");
    }
}
