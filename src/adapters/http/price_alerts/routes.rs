//! HTTP routes for price alerts.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{create_alert, delete_alert, list_alerts, PriceAlertsState};

/// Router mounted at `/api/price-alerts`.
pub fn price_alerts_routes(state: PriceAlertsState) -> Router {
    Router::new()
        .route("/", post(create_alert))
        .route("/", get(list_alerts))
        .route("/", delete(delete_alert))
        .with_state(state)
}
