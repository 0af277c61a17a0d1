//! HTTP handlers for settings endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAdmin;
use crate::services::SettingsService;

use super::dto::{SavePaytrSettingsRequest, SaveSettingsRequest, SavedResponse};

#[derive(Clone)]
pub struct SettingsState {
    pub settings: Arc<SettingsService>,
}

/// GET /api/settings/:key (public, denylisted keys refused)
pub async fn get_settings(
    State(state): State<SettingsState>,
    Path(key): Path<String>,
) -> Response {
    match state.settings.get_public(&key).await {
        Ok(data) => Json(data).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/save-settings
pub async fn save_settings(
    State(state): State<SettingsState>,
    RequireAdmin(_claims): RequireAdmin,
    Json(req): Json<SaveSettingsRequest>,
) -> Response {
    match state.settings.put(&req.filename, req.data).await {
        Ok(()) => Json(SavedResponse::ok()).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/admin/paytr-settings
pub async fn get_paytr_settings(
    State(state): State<SettingsState>,
    RequireAdmin(_claims): RequireAdmin,
) -> Response {
    match state.settings.paytr_settings().await {
        Ok(settings) => Json(settings).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/admin/paytr-settings
pub async fn save_paytr_settings(
    State(state): State<SettingsState>,
    RequireAdmin(_claims): RequireAdmin,
    Json(req): Json<SavePaytrSettingsRequest>,
) -> Response {
    match state.settings.put_paytr_settings(&req.into()).await {
        Ok(()) => Json(SavedResponse::ok()).into_response(),
        Err(err) => error_response(err),
    }
}
