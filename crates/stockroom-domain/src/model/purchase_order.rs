use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::PoStatus;

/// Purchase order header.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PurchaseOrder {
    pub po_id: i64,
    pub vendor_id: i64,
    pub status: PoStatus,
    pub expected_date: Option<DateTime<Utc>>,
    pub terms: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    /// Human-facing PO number carried in from the source system, when any.
    pub external_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Display number: the external reference if present, else `PO-{id}`.
    pub fn po_number(&self) -> String {
        match &self.external_ref {
            Some(reference) => reference.clone(),
            None => format!("PO-{}", self.po_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PoLine {
    pub po_line_id: i64,
    pub po_id: i64,
    pub item_id: i64,
    pub description: String,
    pub qty_ordered: f64,
    pub qty_received: f64,
    pub unit_cost: f64,
}

impl PoLine {
    pub fn qty_remaining(&self) -> f64 {
        (self.qty_ordered - self.qty_received).max(0.0)
    }

    pub fn is_open(&self) -> bool {
        self.qty_received < self.qty_ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ordered: f64, received: f64) -> PoLine {
        PoLine {
            po_line_id: 1,
            po_id: 1,
            item_id: 1,
            description: "Widget".to_string(),
            qty_ordered: ordered,
            qty_received: received,
            unit_cost: 5.0,
        }
    }

    #[test]
    fn remaining_never_goes_negative() {
        assert_eq!(line(10.0, 4.0).qty_remaining(), 6.0);
        assert_eq!(line(10.0, 12.0).qty_remaining(), 0.0);
        assert!(!line(10.0, 12.0).is_open());
    }
}
