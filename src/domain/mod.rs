//! Domain entities and service-layer error taxonomy.

mod error;
pub mod order;
pub mod price_alert;
pub mod settings;
pub mod user;

pub use error::{DomainError, ErrorCode};
