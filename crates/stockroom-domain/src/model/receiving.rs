use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One dock receipt against a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Receiving {
    pub receipt_id: i64,
    pub po_id: i64,
    pub received_at: DateTime<Utc>,
    pub received_by: String,
    pub doc_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReceivingLine {
    pub receipt_line_id: i64,
    pub receipt_id: i64,
    pub po_line_id: i64,
    pub item_id: i64,
    pub qty_received: f64,
    pub unit_cost: f64,
}
