use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::{BarcodeKind, LocationKind};

/// Catalog item. SKU and the 4-character short code are both unique;
/// the short code is what kiosk stations key in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub item_id: i64,
    pub sku: String,
    pub upc: Option<String>,
    pub description: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub vendor_model: Option<String>,
    pub unit_cost: f64,
    pub price: f64,
    pub tax_code: Option<String>,
    pub active: bool,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Barcode {
    pub barcode: String,
    pub item_id: i64,
    pub kind: BarcodeKind,
}

/// Physical stocking area (sales floor, backroom, warehouse, ...).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub location_id: i64,
    pub name: String,
    pub kind: LocationKind,
}
