//! HTTP routes for settings endpoints.
//!
//! These paths do not share a common prefix, so the router carries absolute
//! paths and is merged at the top level rather than nested.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_paytr_settings, get_settings, save_paytr_settings, save_settings, SettingsState,
};

pub fn settings_routes(state: SettingsState) -> Router {
    Router::new()
        .route("/api/settings/:key", get(get_settings))
        .route("/api/save-settings", post(save_settings))
        .route(
            "/api/admin/paytr-settings",
            get(get_paytr_settings).post(save_paytr_settings),
        )
        .with_state(state)
}
