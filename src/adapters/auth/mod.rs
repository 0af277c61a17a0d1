//! Token authority adapters.

mod jwt;

pub use jwt::JwtAuthenticator;
