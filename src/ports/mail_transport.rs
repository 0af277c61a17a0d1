//! Port for the outbound mail transport.

use async_trait::async_trait;
use thiserror::Error;

/// A fully rendered message ready for submission.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Errors from the mail provider.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),

    #[error("Mail provider unreachable: {0}")]
    Network(String),
}

/// Submission contract. Whether a send blocks the caller is decided by the
/// dispatcher, not the transport.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
