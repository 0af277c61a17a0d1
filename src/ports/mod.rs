//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! service layer and the outside world. Adapters implement these ports.

mod mail_transport;
mod order_repository;
mod payment_gateway;
mod price_alert_repository;
mod settings_repository;
mod token_authority;
mod user_repository;

pub use mail_transport::{MailError, MailTransport, OutboundEmail};
pub use order_repository::OrderRepository;
pub use payment_gateway::{
    BasketLine, GatewayError, MerchantCredentials, PaymentGateway, PaymentTokenRequest,
};
pub use price_alert_repository::PriceAlertRepository;
pub use settings_repository::SettingsRepository;
pub use token_authority::{AuthClaims, TokenAuthority};
pub use user_repository::{UserRepository, UserUpdate};
