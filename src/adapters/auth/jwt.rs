//! HS256 JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::user::Role;
use crate::domain::DomainError;
use crate::ports::{AuthClaims, TokenAuthority};

/// Wire format of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: String,
    email: String,
    role: Role,
    /// Expiration time (UTC timestamp).
    exp: i64,
    /// Issued at.
    iat: i64,
}

/// Signs and verifies bearer tokens with a shared symmetric secret.
pub struct JwtAuthenticator {
    secret: SecretString,
    token_ttl: Duration,
}

impl JwtAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            token_ttl: Duration::days(config.token_ttl_days),
        }
    }

    #[cfg(test)]
    fn with_ttl(secret: &str, token_ttl: Duration) -> Self {
        Self {
            secret: SecretString::new(secret.to_string()),
            token_ttl,
        }
    }
}

impl TokenAuthority for JwtAuthenticator {
    fn issue(&self, claims: &AuthClaims) -> Result<String, DomainError> {
        let now = Utc::now();
        let payload = Claims {
            sub: claims.user_id.clone(),
            email: claims.email.clone(),
            role: claims.role,
            exp: (now + self.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            DomainError::internal("Token signing failed")
        })
    }

    fn verify(&self, token: &str) -> Result<AuthClaims, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| DomainError::authentication("Invalid or expired token"))?;

        Ok(AuthClaims {
            user_id: data.claims.sub,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}
