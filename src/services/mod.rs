//! Application services: the flows behind the HTTP surface, wired to the
//! outside world only through ports.

pub mod auth;
pub mod contact;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod price_alerts;
pub mod settings;

pub use auth::AuthService;
pub use contact::ContactService;
pub use notifications::NotificationDispatcher;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use price_alerts::PriceAlertService;
pub use settings::SettingsService;
