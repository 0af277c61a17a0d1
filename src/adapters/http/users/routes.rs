//! HTTP routes for account endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{login, profile, register, update, UsersState};

/// Router mounted at `/api/users`.
pub fn users_routes(state: UsersState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/", put(update))
        .with_state(state)
}
