//! Settings endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::SettingsState;
pub use routes::settings_routes;
