//! Price alert endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PriceAlertsState;
pub use routes::price_alerts_routes;
