//! Order endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrdersState;
pub use routes::orders_routes;
