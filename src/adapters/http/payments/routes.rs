//! HTTP routes for the payment token endpoint.

use axum::{routing::post, Router};

use super::handlers::{issue_payment_token, PaymentsState};

pub fn payments_routes(state: PaymentsState) -> Router {
    Router::new()
        .route("/api/paytr/token", post(issue_payment_token))
        .with_state(state)
}
