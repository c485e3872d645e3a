use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::InventoryReason;

/// On-hand quantity for one item at one location. Unique per pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Inventory {
    pub inv_id: i64,
    pub item_id: i64,
    pub location_id: i64,
    pub qty_on_hand: f64,
    pub qty_reserved: f64,
    pub avg_cost: f64,
    pub last_counted_at: Option<DateTime<Utc>>,
}

/// Append-only movement ledger entry. `ref_type`/`ref_id` point back at
/// the receiving, sale, or manual adjustment that caused the delta.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryTxn {
    pub txn_id: i64,
    pub item_id: i64,
    pub location_id: i64,
    pub qty_delta: f64,
    pub reason: InventoryReason,
    pub ref_type: Option<String>,
    pub ref_id: Option<i64>,
    pub unit_cost: Option<f64>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
