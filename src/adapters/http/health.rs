//! Health check surface. This is the only place connection failure detail
//! is exposed; every other endpoint answers with a generic message.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::adapters::postgres::ConnectionManager;

#[derive(Clone)]
pub struct HealthState {
    pub connection: Arc<ConnectionManager>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_connected: bool,
    pub last_error: Option<String>,
}

/// GET /api/health
pub async fn health(State(state): State<HealthState>) -> impl IntoResponse {
    let db_connected = state.connection.is_connected().await;
    Json(HealthResponse {
        status: "ok",
        db_connected,
        last_error: state.connection.last_error(),
    })
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .with_state(state)
}
