//! Status vocabularies shared across the stockroom crates.
//!
//! Each enum persists as snake_case text and serializes the same way, so
//! the database, the API payloads, and imported spreadsheets all agree on
//! one spelling.

use serde::{Deserialize, Serialize};

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(rename_all = "snake_case")]
        #[sqlx(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> std::result::Result<Self, ()> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}

status_enum! {
    /// Purchase order lifecycle
    PoStatus {
        Draft => "draft",
        Open => "open",
        Partial => "partial",
        Received => "received",
        Closed => "closed",
    }
}

status_enum! {
    /// Sales ticket lifecycle
    SaleStatus {
        Draft => "draft",
        Open => "open",
        Fulfilled => "fulfilled",
        Void => "void",
    }
}

status_enum! {
    /// Incoming truck lifecycle
    TruckStatus {
        Scheduled => "scheduled",
        Arrived => "arrived",
        Unloading => "unloading",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

status_enum! {
    /// Kind of entry in a truck's update stream
    TruckUpdateType {
        Status => "status",
        Note => "note",
        LineProgress => "line_progress",
    }
}

status_enum! {
    /// Reason recorded on an inventory movement
    InventoryReason {
        Receive => "receive",
        Sale => "sale",
        Adjust => "adjust",
        Count => "count",
        Transfer => "transfer",
    }
}

status_enum! {
    /// Delivery progression for a sale
    DeliveryStatus {
        Queued => "queued",
        Scheduled => "scheduled",
        OutForDelivery => "out_for_delivery",
        Delivered => "delivered",
        Failed => "failed",
    }
}

status_enum! {
    /// Vendor bill lifecycle
    BillStatus {
        Draft => "draft",
        Exported => "exported",
        Paid => "paid",
    }
}

status_enum! {
    /// Physical stocking area kinds
    LocationKind {
        Floor => "floor",
        Backroom => "backroom",
        Warehouse => "warehouse",
        Retail => "retail",
    }
}

status_enum! {
    /// What a label template prints for
    LabelTarget {
        Item => "item",
        Bin => "bin",
        Delivery => "delivery",
    }
}

status_enum! {
    /// What a barcode resolves to
    BarcodeKind {
        Item => "item",
        Variant => "variant",
        Lot => "lot",
        Serial => "serial",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trips_snake_case_text() {
        assert_eq!(TruckUpdateType::LineProgress.as_str(), "line_progress");
        assert_eq!(
            TruckUpdateType::from_str("line_progress"),
            Ok(TruckUpdateType::LineProgress)
        );
        assert_eq!(
            DeliveryStatus::from_str("out_for_delivery"),
            Ok(DeliveryStatus::OutForDelivery)
        );
        assert!(PoStatus::from_str("unknown").is_err());
    }

    #[test]
    fn serializes_like_it_displays() {
        let json = serde_json::to_string(&SaleStatus::Fulfilled).unwrap();
        assert_eq!(json, "\"fulfilled\"");
        assert_eq!(SaleStatus::Fulfilled.to_string(), "fulfilled");
    }
}
