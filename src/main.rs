//! Shopfront service binary: configuration, wiring, and the axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shopfront::adapters::auth::JwtAuthenticator;
use shopfront::adapters::email::ResendMailTransport;
use shopfront::adapters::http::{
    api_router, AppState, ContactState, HealthState, OrdersState, PaymentsState,
    PriceAlertsState, SettingsState, UsersState,
};
use shopfront::adapters::paytr::PaytrGateway;
use shopfront::adapters::postgres::{
    ConnectionManager, PostgresOrderRepository, PostgresPriceAlertRepository,
    PostgresSettingsRepository, PostgresUserRepository,
};
use shopfront::config::AppConfig;
use shopfront::ports::{
    MailTransport, OrderRepository, PaymentGateway, PriceAlertRepository, SettingsRepository,
    TokenAuthority, UserRepository,
};
use shopfront::services::{
    AuthService, ContactService, NotificationDispatcher, OrderService, PaymentService,
    PriceAlertService, SettingsService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting shopfront"
    );

    let connection = Arc::new(ConnectionManager::new(config.database.clone()));

    if config.database.run_migrations {
        match connection.acquire().await {
            Some(pool) => {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations applied");
            }
            None => tracing::warn!(
                error = ?connection.last_error(),
                "Skipping migrations, database unavailable"
            ),
        }
    }

    let users_repo: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(connection.clone()));
    let orders_repo: Arc<dyn OrderRepository> =
        Arc::new(PostgresOrderRepository::new(connection.clone()));
    let settings_repo: Arc<dyn SettingsRepository> =
        Arc::new(PostgresSettingsRepository::new(connection.clone()));
    let alerts_repo: Arc<dyn PriceAlertRepository> =
        Arc::new(PostgresPriceAlertRepository::new(connection.clone()));

    let tokens: Arc<dyn TokenAuthority> = Arc::new(JwtAuthenticator::new(&config.auth));
    let transport: Arc<dyn MailTransport> = Arc::new(ResendMailTransport::new(&config.email));
    let dispatcher = Arc::new(NotificationDispatcher::new(transport));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(PaytrGateway::new(&config.payment));

    let auth_service = Arc::new(AuthService::new(
        users_repo,
        tokens.clone(),
        dispatcher.clone(),
        config.auth.bcrypt_cost,
    ));
    let settings_service = Arc::new(SettingsService::new(settings_repo.clone()));
    let order_service = Arc::new(OrderService::new(
        orders_repo,
        settings_repo.clone(),
        dispatcher.clone(),
        config.email.admin_email.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        gateway,
        settings_service.clone(),
        config.payment.clone(),
    ));
    let contact_service = Arc::new(ContactService::new(
        settings_repo,
        dispatcher,
        config.email.admin_email.clone(),
    ));
    let alerts_service = Arc::new(PriceAlertService::new(alerts_repo));

    let state = AppState {
        users: UsersState { auth: auth_service },
        orders: OrdersState {
            orders: order_service,
        },
        settings: SettingsState {
            settings: settings_service,
        },
        payments: PaymentsState {
            payments: payment_service,
        },
        contact: ContactState {
            contact: contact_service,
        },
        price_alerts: PriceAlertsState {
            alerts: alerts_service,
        },
        health: HealthState {
            connection: connection.clone(),
        },
        auth: tokens,
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_origins_list()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
