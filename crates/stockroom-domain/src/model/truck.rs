use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::{TruckStatus, TruckUpdateType};

/// An inbound shipment against a purchase order, tracked from scheduling
/// through unloading at the dock.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IncomingTruck {
    pub truck_id: i64,
    pub po_id: i64,
    pub reference: String,
    pub carrier: Option<String>,
    pub status: TruckStatus,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Expected contents of a truck, referencing a line of its PO.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TruckLine {
    pub truck_line_id: i64,
    pub truck_id: i64,
    pub po_line_id: i64,
    pub item_id: i64,
    pub description: Option<String>,
    pub qty_expected: Option<f64>,
}

/// One entry in a truck's update stream: a status change, a free-text
/// note, or unloading progress against a PO line.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TruckUpdate {
    pub update_id: i64,
    pub truck_id: i64,
    pub update_type: TruckUpdateType,
    pub message: Option<String>,
    pub status: Option<TruckStatus>,
    pub po_line_id: Option<i64>,
    pub item_id: Option<i64>,
    pub quantity: Option<f64>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
