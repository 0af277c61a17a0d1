//! In-memory mail transport for tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::{MailError, MailTransport, OutboundEmail};

/// Records every message instead of sending it. Optionally sleeps before
/// accepting, to simulate a slow provider.
#[derive(Default)]
pub struct MockMailTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    delay: Option<Duration>,
    fail: bool,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before accepting each message.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject every message.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(MailError::Rejected("mock transport set to fail".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(email.clone());
        Ok(())
    }
}
