//! HTTP routes for order endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{create_order, list_orders, track_order, update_order, OrdersState};

/// Router mounted at `/api/orders`.
pub fn orders_routes(state: OrdersState) -> Router {
    Router::new()
        .route("/", get(list_orders))
        .route("/", post(create_order))
        .route("/", put(update_order))
        .route("/track", post(track_order))
        .with_state(state)
}
