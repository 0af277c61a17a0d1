//! Order creation, status updates, public tracking and listing.

use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{Order, OrderItem, OrderStatus, TrackedOrder};
use crate::domain::settings::{NotificationSettings, NOTIFICATION_SETTINGS_KEY};
use crate::domain::DomainError;
use crate::ports::{OrderRepository, SettingsRepository};
use crate::services::notifications::{Notification, NotificationDispatcher};

/// Order creation input, already shaped by the HTTP layer. `order_no` and
/// `status` are defaults, not mandates: a supplied value is kept, a missing
/// one is filled in.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub amount: f64,
    pub order_no: Option<String>,
    pub status: Option<String>,
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    settings: Arc<dyn SettingsRepository>,
    dispatcher: Arc<NotificationDispatcher>,
    fallback_admin_email: String,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        settings: Arc<dyn SettingsRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        fallback_admin_email: String,
    ) -> Self {
        Self {
            orders,
            settings,
            dispatcher,
            fallback_admin_email,
        }
    }

    /// Persist a new order and notify customer and admins off the response
    /// path. Works for guest checkouts (`user_id` absent) as well.
    pub async fn create(&self, request: CreateOrder) -> Result<Order, DomainError> {
        if request.items.is_empty() {
            return Err(DomainError::validation("Order must contain at least one item"));
        }
        if request.amount <= 0.0 {
            return Err(DomainError::validation("Order amount must be positive"));
        }
        if request.customer_name.trim().is_empty() || request.customer_email.trim().is_empty() {
            return Err(DomainError::validation("Customer name and email are required"));
        }

        // A checkout that already holds a gateway merchant_oid supplies it
        // here; only a missing or blank number gets a generated one.
        let order_no = request
            .order_no
            .map(|no| no.trim().to_string())
            .filter(|no| !no.is_empty())
            .unwrap_or_else(generate_order_no);

        let status = match request.status.as_deref() {
            Some(s) => OrderStatus::parse(s)
                .ok_or_else(|| DomainError::validation(format!("Unknown order status: {}", s)))?,
            None => OrderStatus::Pending,
        };

        let order = Order {
            id: Uuid::new_v4(),
            order_no,
            user_id: request.user_id,
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            items: request.items,
            amount: request.amount,
            status,
            tracking_number: None,
            created_at: Utc::now(),
        };

        self.orders.insert(&order).await?;
        tracing::info!(order_no = %order.order_no, amount = order.amount, "Order created");

        self.dispatcher.send_detached(Notification::OrderReceived {
            to: order.customer_email.clone(),
            name: order.customer_name.clone(),
            order_no: order.order_no.clone(),
            amount: order.amount,
        });
        self.dispatcher.send_detached(Notification::AdminNewOrder {
            to: self.admin_recipients().await,
            order_no: order.order_no.clone(),
            customer_name: order.customer_name.clone(),
            amount: order.amount,
        });

        Ok(order)
    }

    /// Change an order's status, identified by internal id or public order
    /// number. A tracking number, when supplied, is stored alongside; the
    /// customer is notified off the response path.
    pub async fn update_status(
        &self,
        identifier: &str,
        status: &str,
        tracking_number: Option<String>,
    ) -> Result<Order, DomainError> {
        let status = OrderStatus::parse(status)
            .ok_or_else(|| DomainError::validation(format!("Unknown order status: {}", status)))?;

        let order = self
            .orders
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| DomainError::not_found("Order not found"))?;

        self.orders
            .apply_update(order.id, status, tracking_number.clone())
            .await?;
        tracing::info!(order_no = %order.order_no, status = %status.as_str(), "Order status updated");

        let tracking_number = tracking_number.or(order.tracking_number);
        self.dispatcher.send_detached(Notification::OrderStatusChanged {
            to: order.customer_email.clone(),
            name: order.customer_name.clone(),
            order_no: order.order_no.clone(),
            status,
            tracking_number: tracking_number.clone(),
        });

        Ok(Order {
            status,
            tracking_number,
            ..order
        })
    }

    /// Public tracking view by order number. Never exposes the customer's
    /// email or full name.
    pub async fn track(&self, order_no: &str) -> Result<TrackedOrder, DomainError> {
        let order = self
            .orders
            .find_by_order_no(order_no.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Order not found"))?;
        Ok(order.to_tracked())
    }

    /// All orders, or one user's orders, newest first.
    pub async fn list(&self, user_id: Option<&str>) -> Result<Vec<Order>, DomainError> {
        self.orders.list(user_id).await
    }

    /// Admin recipients come from the stored notification settings; when none
    /// are configured the deployment-level admin address is used.
    async fn admin_recipients(&self) -> Vec<String> {
        let configured = match self.settings.get(NOTIFICATION_SETTINGS_KEY).await {
            Ok(Some(doc)) => serde_json::from_value::<NotificationSettings>(doc.data)
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

/// Public order number: "SF-" + millisecond timestamp + 4 random digits.
/// Timestamp-derived, so collisions are improbable but not impossible.
fn generate_order_no() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("SF-{}{:04}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockMailTransport;
    use crate::domain::settings::SettingsDocument;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct InMemoryOrderRepository {
        orders: Mutex<Vec<Order>>,
    }

    impl InMemoryOrderRepository {
        fn new() -> Self {
            Self {
                orders: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl OrderRepository for InMemoryOrderRepository {
        async fn insert(&self, order: &Order) -> Result<(), DomainError> {
            self.orders.lock().unwrap().push(order.clone());
            Ok(())
        }

        async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Order>, DomainError> {
            let orders = self.orders.lock().unwrap();
            Ok(orders
                .iter()
                .find(|o| {
                    o.id.to_string() == identifier
                        || o.order_no.eq_ignore_ascii_case(identifier)
                })
                .cloned())
        }

        async fn find_by_order_no(&self, order_no: &str) -> Result<Option<Order>, DomainError> {
            let orders = self.orders.lock().unwrap();
            Ok(orders
                .iter()
                .find(|o| o.order_no.eq_ignore_ascii_case(order_no))
                .cloned())
        }

        async fn apply_update(
            &self,
            id: Uuid,
            status: OrderStatus,
            tracking_number: Option<String>,
        ) -> Result<(), DomainError> {
            let mut orders = self.orders.lock().unwrap();
            let order = orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| DomainError::not_found("Order not found"))?;
            order.status = status;
            if tracking_number.is_some() {
                order.tracking_number = tracking_number;
            }
            Ok(())
        }

        async fn list(&self, user_id: Option<&str>) -> Result<Vec<Order>, DomainError> {
            let orders = self.orders.lock().unwrap();
            let mut matched: Vec<Order> = orders
                .iter()
                .filter(|o| match user_id {
                    Some(uid) => o.user_id.as_deref() == Some(uid),
                    None => true,
                })
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(matched)
        }
    }

    struct InMemorySettingsRepository {
        documents: Mutex<HashMap<String, serde_json::Value>>,
    }

    impl InMemorySettingsRepository {
        fn new() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
            }
        }

        fn with_document(key: &str, data: serde_json::Value) -> Self {
            let repo = Self::new();
            repo.documents.lock().unwrap().insert(key.to_string(), data);
            repo
        }
    }

    #[async_trait]
    impl SettingsRepository for InMemorySettingsRepository {
        async fn get(&self, key: &str) -> Result<Option<SettingsDocument>, DomainError> {
            Ok(self.documents.lock().unwrap().get(key).map(|data| {
                SettingsDocument {
                    key: key.to_string(),
                    data: data.clone(),
                    updated_at: Utc::now(),
                }
            }))
        }

        async fn upsert(&self, key: &str, data: serde_json::Value) -> Result<(), DomainError> {
            self.documents.lock().unwrap().insert(key.to_string(), data);
            Ok(())
        }
    }

    fn service_with(
        settings: InMemorySettingsRepository,
        transport: Arc<MockMailTransport>,
    ) -> OrderService {
        OrderService::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(settings),
            Arc::new(NotificationDispatcher::new(transport)),
            "orders@shopfront.dev".to_string(),
        )
    }

    fn create_request() -> CreateOrder {
        CreateOrder {
            user_id: None,
            customer_name: "Mehmet Kaya".to_string(),
            customer_email: "mehmet@example.com".to_string(),
            items: vec![OrderItem {
                name: "Kahve Makinesi".to_string(),
                price: 149.9,
                quantity: 1,
                image: None,
            }],
            amount: 149.9,
            order_no: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_a_prefixed_order_no() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let order = service.create(create_request()).await.unwrap();
        assert!(order.order_no.starts_with("SF-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.tracking_number.is_none());
    }

    #[tokio::test]
    async fn create_keeps_a_supplied_order_no_and_status() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let mut request = create_request();
        request.order_no = Some(" CUSTOM-1 ".to_string());
        request.status = Some("processing".to_string());

        let order = service.create(request).await.unwrap();
        assert_eq!(order.order_no, "CUSTOM-1");
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn create_generates_when_the_supplied_order_no_is_blank() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let mut request = create_request();
        request.order_no = Some("   ".to_string());
        let order = service.create(request).await.unwrap();
        assert!(order.order_no.starts_with("SF-"));
    }

    #[tokio::test]
    async fn create_rejects_an_unknown_initial_status() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let mut request = create_request();
        request.status = Some("teleported".to_string());
        let err = service.create(request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn create_rejects_an_empty_basket() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let mut request = create_request();
        request.items.clear();
        let err = service.create(request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn create_returns_before_slow_email_dispatch() {
        let transport = Arc::new(MockMailTransport::new().with_delay(Duration::from_secs(2)));
        let service = service_with(InMemorySettingsRepository::new(), transport);

        let started = Instant::now();
        service.create(create_request()).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn create_notifies_customer_and_configured_admins() {
        let transport = Arc::new(MockMailTransport::new());
        let settings = InMemorySettingsRepository::with_document(
            NOTIFICATION_SETTINGS_KEY,
            json!({ "adminEmails": ["ops@example.com", "owner@example.com"] }),
        );
        let service = service_with(settings, transport.clone());

        service.create(create_request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        let admin = sent
            .iter()
            .find(|e| e.subject.starts_with("New order"))
            .unwrap();
        assert_eq!(admin.to, vec!["ops@example.com", "owner@example.com"]);
    }

    #[tokio::test]
    async fn admin_notification_falls_back_to_deployment_address() {
        let transport = Arc::new(MockMailTransport::new());
        let service = service_with(InMemorySettingsRepository::new(), transport.clone());

        service.create(create_request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let sent = transport.sent();
        let admin = sent
            .iter()
            .find(|e| e.subject.starts_with("New order"))
            .unwrap();
        assert_eq!(admin.to, vec!["orders@shopfront.dev"]);
    }

    #[tokio::test]
    async fn update_accepts_either_identifier() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let order = service.create(create_request()).await.unwrap();

        let by_no = service
            .update_status(&order.order_no.to_lowercase(), "processing", None)
            .await
            .unwrap();
        assert_eq!(by_no.status, OrderStatus::Processing);

        let by_id = service
            .update_status(&order.id.to_string(), "shipped", Some("TRK-1".to_string()))
            .await
            .unwrap();
        assert_eq!(by_id.status, OrderStatus::Shipped);
        assert_eq!(by_id.tracking_number.as_deref(), Some("TRK-1"));
    }

    #[tokio::test]
    async fn update_rejects_an_unknown_status() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let order = service.create(create_request()).await.unwrap();
        let err = service
            .update_status(&order.order_no, "teleported", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn track_masks_the_customer_name() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let order = service.create(create_request()).await.unwrap();
        let tracked = service.track(&order.order_no).await.unwrap();
        assert_eq!(tracked.customer_name, "M*** K***");
    }

    #[tokio::test]
    async fn list_filters_by_user() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let mut owned = create_request();
        owned.user_id = Some("user-1".to_string());
        service.create(owned).await.unwrap();
        service.create(create_request()).await.unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 2);
        assert_eq!(service.list(Some("user-1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = service_with(
            InMemorySettingsRepository::new(),
            Arc::new(MockMailTransport::new()),
        );
        let first = service.create(create_request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = service.create(create_request()).await.unwrap();

        let orders = service.list(None).await.unwrap();
        assert_eq!(orders[0].order_no, second.order_no);
        assert_eq!(orders[1].order_no, first.order_no);
    }
}
