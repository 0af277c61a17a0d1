//! Account endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UsersState;
pub use routes::users_routes;
