use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::{DeliveryStatus, SaleStatus};

/// Sales ticket. Drafts come from the floor or from OCR-captured paper
/// tickets (`source = "ocr_ticket"`); finalizing moves inventory.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub sale_id: i64,
    pub customer_id: Option<i64>,
    pub status: SaleStatus,
    pub sale_date: DateTime<Utc>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub deposit_amt: f64,
    pub created_by: Option<String>,
    pub source: Option<String>,
    pub ocr_confidence: Option<f64>,
    pub delivery_requested: bool,
    pub delivery_status: Option<DeliveryStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleLine {
    pub sale_line_id: i64,
    pub sale_id: i64,
    pub item_id: i64,
    pub location_id: i64,
    pub qty: f64,
    pub unit_price: f64,
}
