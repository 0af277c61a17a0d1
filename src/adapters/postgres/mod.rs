//! PostgreSQL adapters: the connection manager and repository
//! implementations over JSONB-backed tables.

mod connection;
mod order_repository;
mod price_alert_repository;
mod settings_repository;
mod user_repository;

pub use connection::ConnectionManager;
pub use order_repository::PostgresOrderRepository;
pub use price_alert_repository::PostgresPriceAlertRepository;
pub use settings_repository::PostgresSettingsRepository;
pub use user_repository::PostgresUserRepository;
