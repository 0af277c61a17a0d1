//! Contact form handling. Unlike order notifications, the admin send is
//! awaited: the HTTP response is the delivery confirmation.

use std::sync::Arc;

use crate::domain::settings::NOTIFICATION_SETTINGS_KEY;
use crate::domain::DomainError;
use crate::ports::SettingsRepository;
use crate::services::notifications::{Notification, NotificationDispatcher};

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub struct ContactService {
    settings: Arc<dyn SettingsRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    fallback_admin_email: String,
}

impl ContactService {
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        fallback_admin_email: String,
    ) -> Self {
        Self {
            settings,
            dispatcher,
            fallback_admin_email,
        }
    }

    /// Forward the message to the admin inbox, then confirm to the sender.
    /// The admin send is awaited; the confirmation is best effort.
    pub async fn submit(&self, message: ContactMessage) -> Result<(), DomainError> {
        if message.name.trim().is_empty()
            || message.email.trim().is_empty()
            || message.message.trim().is_empty()
        {
            return Err(DomainError::validation("Name, email and message are required"));
        }

        self.dispatcher
            .send(Notification::ContactForm {
                to: self.admin_recipients().await,
                name: message.name.clone(),
                email: message.email.clone(),
                subject: message.subject.clone(),
                message: message.message.clone(),
            })
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Contact form delivery failed");
                DomainError::store_unavailable()
            })?;

        self.dispatcher.send_detached(Notification::ContactConfirmation {
            to: message.email,
            name: message.name,
            subject: message.subject,
        });

        Ok(())
    }

    async fn admin_recipients(&self) -> Vec<String> {
        let configured = match self.settings.get(NOTIFICATION_SETTINGS_KEY).await {
            Ok(Some(doc)) => serde_json::from_value::<
                crate::domain::settings::NotificationSettings,
            >(doc.data)
            .map(|s| s.admin_emails)
            .unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load notification settings");
                Vec::new()
            }
        };
        if configured.is_empty() {
            vec![self.fallback_admin_email.clone()]
        } else {
            configured
        }
    }
}
