//! HTTP handlers for price alerts. The owning user always comes from the
//! verified token, never from the request.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::services::PriceAlertService;

use super::dto::{
    CreatePriceAlertRequest, DeletePriceAlertQuery, DeletedResponse, PriceAlertListResponse,
    PriceAlertResponse,
};

#[derive(Clone)]
pub struct PriceAlertsState {
    pub alerts: Arc<PriceAlertService>,
}

/// POST /api/price-alerts
pub async fn create_alert(
    State(state): State<PriceAlertsState>,
    RequireAuth(claims): RequireAuth,
    Json(req): Json<CreatePriceAlertRequest>,
) -> Response {
    match state.alerts.create(&claims.user_id, &req.product_id).await {
        Ok(alert) => (
            StatusCode::CREATED,
            Json(PriceAlertResponse {
                success: true,
                data: alert,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/price-alerts
pub async fn list_alerts(
    State(state): State<PriceAlertsState>,
    RequireAuth(claims): RequireAuth,
) -> Response {
    match state.alerts.list(&claims.user_id).await {
        Ok(alerts) => Json(PriceAlertListResponse {
            success: true,
            data: alerts,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/price-alerts?productId=
pub async fn delete_alert(
    State(state): State<PriceAlertsState>,
    RequireAuth(claims): RequireAuth,
    Query(query): Query<DeletePriceAlertQuery>,
) -> Response {
    match state.alerts.delete(&claims.user_id, &query.product_id).await {
        Ok(()) => Json(DeletedResponse { success: true }).into_response(),
        Err(err) => error_response(err),
    }
}
