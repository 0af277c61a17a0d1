//! Payment endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PaymentsState;
pub use routes::payments_routes;
