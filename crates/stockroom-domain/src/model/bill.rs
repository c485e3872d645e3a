use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::BillStatus;

/// Vendor invoice, drafted automatically when a PO receipt is posted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bill {
    pub bill_id: i64,
    pub vendor_id: i64,
    pub po_id: Option<i64>,
    pub invoice_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub subtotal: f64,
    pub tax: f64,
    pub freight: f64,
    pub total: f64,
    pub status: BillStatus,
    pub doc_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
