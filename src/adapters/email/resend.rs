//! Resend mail transport.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::ports::{MailError, MailTransport, OutboundEmail};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Submits rendered messages to the Resend HTTP API.
pub struct ResendMailTransport {
    api_key: SecretString,
    from_header: String,
    api_url: String,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl ResendMailTransport {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_key: config.resend_api_key.clone(),
            from_header: config.from_header(),
            api_url: RESEND_API_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Point at a different endpoint (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl MailTransport for ResendMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let body = SendRequest {
            from: &self.from_header,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, detail = %detail, "Resend rejected a message");
            return Err(MailError::Rejected(format!("{}: {}", status, detail)));
        }

        Ok(())
    }
}
