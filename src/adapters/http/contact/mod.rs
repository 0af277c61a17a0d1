//! Contact form endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContactState;
pub use routes::contact_routes;
