//! Port for signed-token issuance and verification.

use crate::domain::user::Role;
use crate::domain::DomainError;

/// What an issued token embeds and what a verified token yields back.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthClaims {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Issues and verifies bearer tokens. Kept synchronous: signing is pure CPU
/// work and the middleware runs it inline.
pub trait TokenAuthority: Send + Sync {
    /// Sign a token embedding the claims, with the configured expiry.
    fn issue(&self, claims: &AuthClaims) -> Result<String, DomainError>;

    /// Verify signature and expiry; any failure is an authentication error.
    fn verify(&self, token: &str) -> Result<AuthClaims, DomainError>;
}
