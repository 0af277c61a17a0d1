//! HTTP routes for the contact form.

use axum::{routing::post, Router};

use super::handlers::{submit_contact, ContactState};

pub fn contact_routes(state: ContactState) -> Router {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .with_state(state)
}
