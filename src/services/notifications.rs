//! Notification dispatcher.
//!
//! Renders string-interpolated HTML (no template engine) and hands the
//! result to the mail transport. Two dispatch modes:
//!
//! - [`NotificationDispatcher::send`] awaits the transport; used by the
//!   contact flow, where the HTTP response *is* the delivery confirmation.
//! - [`NotificationDispatcher::send_detached`] spawns the send and returns
//!   immediately; used by order and registration flows so a slow mail
//!   provider can never add latency or failure to the primary transaction.
//!   Failures are logged and swallowed.

use std::sync::Arc;

use crate::domain::order::OrderStatus;
use crate::ports::{MailError, MailTransport, OutboundEmail};

/// A renderable message, one variant per template kind.
#[derive(Debug, Clone)]
pub enum Notification {
    Welcome {
        to: String,
        name: String,
    },
    OrderReceived {
        to: String,
        name: String,
        order_no: String,
        amount: f64,
    },
    OrderStatusChanged {
        to: String,
        name: String,
        order_no: String,
        status: OrderStatus,
        tracking_number: Option<String>,
    },
    AdminNewOrder {
        to: Vec<String>,
        order_no: String,
        customer_name: String,
        amount: f64,
    },
    ContactForm {
        to: Vec<String>,
        name: String,
        email: String,
        subject: String,
        message: String,
    },
    ContactConfirmation {
        to: String,
        name: String,
        subject: String,
    },
}

impl Notification {
    /// Interpolate the template into a ready-to-send message.
    fn render(&self) -> OutboundEmail {
        match self {
            Notification::Welcome { to, name } => OutboundEmail {
                to: vec![to.clone()],
                subject: "Welcome to Shopfront".to_string(),
                html: format!(
                    "<h1>Welcome, {name}!</h1>\
                     <p>Your account is ready. Happy shopping!</p>"
                ),
            },
            Notification::OrderReceived {
                to,
                name,
                order_no,
                amount,
            } => OutboundEmail {
                to: vec![to.clone()],
                subject: format!("We received your order {order_no}"),
                html: format!(
                    "<h1>Thank you, {name}!</h1>\
                     <p>Your order <strong>{order_no}</strong> for {amount:.2} TL has been received \
                     and is being prepared.</p>\
                     <p>You can follow it any time with your order number.</p>"
                ),
            },
            Notification::OrderStatusChanged {
                to,
                name,
                order_no,
                status,
                tracking_number,
            } => {
                let tracking = tracking_number
                    .as_ref()
                    .map(|t| format!("<p>Tracking number: <strong>{t}</strong></p>"))
                    .unwrap_or_default();
                OutboundEmail {
                    to: vec![to.clone()],
                    subject: format!("Your order {order_no} is now {}", status.as_str()),
                    html: format!(
                        "<h1>Hello, {name}</h1>\
                         <p>Order <strong>{order_no}</strong> moved to status \
                         <strong>{}</strong>.</p>{tracking}",
                        status.as_str()
                    ),
                }
            }
            Notification::AdminNewOrder {
                to,
                order_no,
                customer_name,
                amount,
            } => OutboundEmail {
                to: to.clone(),
                subject: format!("New order {order_no}"),
                html: format!(
                    "<h1>New order</h1>\
                     <p><strong>{order_no}</strong> from {customer_name}, {amount:.2} TL.</p>"
                ),
            },
            Notification::ContactForm {
                to,
                name,
                email,
                subject,
                message,
            } => OutboundEmail {
                to: to.clone(),
                subject: format!("Contact form: {subject}"),
                html: format!(
                    "<h1>Contact form submission</h1>\
                     <p><strong>From:</strong> {name} &lt;{email}&gt;</p>\
                     <p>{message}</p>"
                ),
            },
            Notification::ContactConfirmation { to, name, subject } => OutboundEmail {
                to: vec![to.clone()],
                subject: "We received your message".to_string(),
                html: format!(
                    "<h1>Thank you, {name}</h1>\
                     <p>We received your message about \"{subject}\" and will get back to you \
                     shortly.</p>"
                ),
            },
        }
    }
}

/// Renders notifications and submits them to the configured transport.
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Render and send, awaiting the transport.
    pub async fn send(&self, notification: Notification) -> Result<(), MailError> {
        let email = notification.render();
        self.transport.send(&email).await
    }

    /// Render and send on a detached task. The caller's request lifecycle is
    /// never tied to the transport: failures land in the log, nowhere else.
    pub fn send_detached(&self, notification: Notification) {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let email = notification.render();
            if let Err(err) = transport.send(&email).await {
                tracing::warn!(error = %err, subject = %email.subject, "Detached notification send failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockMailTransport;

    #[test]
    fn order_received_interpolates_fields() {
        let email = Notification::OrderReceived {
            to: "ayse@example.com".to_string(),
            name: "Ayşe".to_string(),
            order_no: "SF-1000".to_string(),
            amount: 149.9,
        }
        .render();
        assert_eq!(email.to, vec!["ayse@example.com".to_string()]);
        assert!(email.subject.contains("SF-1000"));
        assert!(email.html.contains("Ayşe"));
        assert!(email.html.contains("149.90 TL"));
    }

    #[test]
    fn status_change_includes_tracking_when_present() {
        let with = Notification::OrderStatusChanged {
            to: "a@b.com".to_string(),
            name: "A".to_string(),
            order_no: "SF-1".to_string(),
            status: OrderStatus::Shipped,
            tracking_number: Some("TRK-42".to_string()),
        }
        .render();
        assert!(with.html.contains("TRK-42"));

        let without = Notification::OrderStatusChanged {
            to: "a@b.com".to_string(),
            name: "A".to_string(),
            order_no: "SF-1".to_string(),
            status: OrderStatus::Processing,
            tracking_number: None,
        }
        .render();
        assert!(!without.html.contains("Tracking number"));
    }

    #[test]
    fn admin_alert_goes_to_all_recipients() {
        let email = Notification::AdminNewOrder {
            to: vec!["ops@example.com".to_string(), "owner@example.com".to_string()],
            order_no: "SF-1".to_string(),
            customer_name: "Ayşe Yılmaz".to_string(),
            amount: 10.0,
        }
        .render();
        assert_eq!(email.to.len(), 2);
    }

    #[tokio::test]
    async fn send_awaits_the_transport() {
        let transport = Arc::new(MockMailTransport::new());
        let dispatcher = NotificationDispatcher::new(transport.clone());
        dispatcher
            .send(Notification::Welcome {
                to: "a@b.com".to_string(),
                name: "A".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn detached_send_swallows_transport_failures() {
        let transport = Arc::new(MockMailTransport::failing());
        let dispatcher = NotificationDispatcher::new(transport.clone());
        dispatcher.send_detached(Notification::Welcome {
            to: "a@b.com".to_string(),
            name: "A".to_string(),
        });
        // Give the detached task a chance to run; the failure must stay
        // contained in the task.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(transport.sent_count(), 0);
    }
}
