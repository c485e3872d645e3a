use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supplier master record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vendor {
    pub vendor_id: i64,
    pub name: String,
    pub terms: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// JSON-encoded [`VendorAddress`], kept as raw text so the row maps
    /// straight out of the database.
    pub address_json: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Vendor {
    /// Parse the stored address blob. Malformed JSON reads as no address.
    pub fn address(&self) -> Option<VendorAddress> {
        self.address_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}
