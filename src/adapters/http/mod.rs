//! HTTP adapters: the REST surface over the application services.
//!
//! Each domain has its own `routes`/`handlers`/`dto` triple; the routers are
//! assembled here and wrapped in the auth middleware so any route may opt
//! into `RequireAuth`/`RequireAdmin`.

pub mod contact;
pub mod error;
pub mod health;
pub mod middleware;
pub mod orders;
pub mod payments;
pub mod price_alerts;
pub mod settings;
pub mod users;

use axum::Router;

use crate::adapters::http::middleware::{auth_middleware, AuthState};

pub use contact::ContactState;
pub use health::HealthState;
pub use orders::OrdersState;
pub use payments::PaymentsState;
pub use price_alerts::PriceAlertsState;
pub use settings::SettingsState;
pub use users::UsersState;

/// Everything the HTTP surface needs, one state struct per domain.
#[derive(Clone)]
pub struct AppState {
    pub users: UsersState,
    pub orders: OrdersState,
    pub settings: SettingsState,
    pub payments: PaymentsState,
    pub contact: ContactState,
    pub price_alerts: PriceAlertsState,
    pub health: HealthState,
    pub auth: AuthState,
}

/// The complete API router, auth middleware applied.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/users", users::users_routes(state.users))
        .nest("/api/orders", orders::orders_routes(state.orders))
        .nest(
            "/api/price-alerts",
            price_alerts::price_alerts_routes(state.price_alerts),
        )
        .merge(settings::settings_routes(state.settings))
        .merge(payments::payments_routes(state.payments))
        .merge(contact::contact_routes(state.contact))
        .merge(health::health_routes(state.health))
        .layer(axum::middleware::from_fn_with_state(
            state.auth,
            auth_middleware,
        ))
}
