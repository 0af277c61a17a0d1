//! Price alerts: created and deleted only, never updated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A standing request to be notified when a product's price drops.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub id: Uuid,
    pub user_id: String,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
}
