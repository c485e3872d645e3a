//! Demo dataset
//!
//! Enough records to make every page show something: stocked items,
//! customers, tickets in each state, an inbound PO with a scheduled
//! truck, and a posted receipt.

use stockroom_domain::VendorAddress;
use stockroom_store::{
    NewItem, NewPoLine, NewTruckLine, NewTruckUpdate, ReceiveLine, Store,
};
use stockroom_types::{
    BarcodeKind, InventoryReason, LabelTarget, LocationKind, Result, SaleStatus, TruckStatus,
    TruckUpdateType,
};

const SHELF_LABEL_XML: &str =
    "<label size=\"2x1\"><line>{DESCRIPTION}</line><line>{SKU} {SHORT_CODE}</line>\
     <line>${PRICE} {UPCHARGE_CODE}</line></label>";

/// Load the demo dataset. No-op when items already exist; returns
/// whether anything was seeded.
pub async fn apply(store: &Store) -> Result<bool> {
    if store.dataset_counts().await?.items > 0 {
        return Ok(false);
    }

    let (widget_co, _) = store.get_or_create_vendor("Widget Co").await?;
    store
        .create_vendor(
            "Gadget Supply",
            Some("Net 15"),
            Some("555-0140"),
            Some("orders@gadget.example"),
            Some(&VendorAddress {
                line1: Some("12 Dock St".to_string()),
                city: Some("Tulsa".to_string()),
                state: Some("OK".to_string()),
                ..Default::default()
            }),
        )
        .await?;

    let (floor, _) = store
        .get_or_create_location("Sales Floor", LocationKind::Floor)
        .await?;
    let (backroom, _) = store
        .get_or_create_location("Backroom", LocationKind::Backroom)
        .await?;
    store
        .get_or_create_location("Main Warehouse", LocationKind::Warehouse)
        .await?;

    let catalog = [
        ("WID-001", "Walnut Widget", 5.0, 12.5, "012345678905"),
        ("WID-002", "Oak Widget", 6.0, 14.0, "012345678912"),
        ("GAD-100", "Brass Gadget", 11.0, 24.0, "036000291452"),
        ("GAD-200", "Copper Gadget", 14.5, 32.0, "036000291469"),
    ];
    let mut items = Vec::new();
    for (index, (sku, description, unit_cost, price, barcode)) in catalog.iter().enumerate() {
        let item = store
            .create_item(&NewItem {
                sku: sku.to_string(),
                upc: None,
                description: description.to_string(),
                category: Some("Hardware".to_string()),
                subcategory: None,
                vendor_model: None,
                unit_cost: *unit_cost,
                price: *price,
                tax_code: None,
                short_code: format!("D{:03}", index + 1),
            })
            .await?;
        store
            .add_barcode(item.item_id, barcode, BarcodeKind::Item)
            .await?;
        let location_id = if index % 2 == 0 {
            floor.location_id
        } else {
            backroom.location_id
        };
        store
            .adjust_inventory(
                item.item_id,
                location_id,
                8.0 + index as f64,
                InventoryReason::Count,
                Some("seed"),
            )
            .await?;
        items.push(item);
    }

    store
        .create_customer("Dana Field", Some("555-0101"), Some("dana@example.com"))
        .await?;
    store
        .create_customer("Robin Yount", Some("555-0102"), Some("robin@example.com"))
        .await?;

    store
        .create_label_template("Shelf Label 2x1", LabelTarget::Item, SHELF_LABEL_XML)
        .await?;

    // Inbound PO with a truck already on the road.
    let inbound_po = store
        .create_po(
            widget_co.vendor_id,
            &[
                NewPoLine {
                    item_id: items[0].item_id,
                    description: items[0].description.clone(),
                    qty_ordered: 10.0,
                    unit_cost: items[0].unit_cost,
                },
                NewPoLine {
                    item_id: items[1].item_id,
                    description: items[1].description.clone(),
                    qty_ordered: 6.0,
                    unit_cost: items[1].unit_cost,
                },
            ],
            Some("Spring restock"),
            "seed",
        )
        .await?;
    let po_lines = store.po_lines(inbound_po.po_id).await?;
    let truck = store
        .create_truck(
            inbound_po.po_id,
            "TRUCK-4821",
            Some("Acme Freight"),
            TruckStatus::Scheduled,
            None,
            &[NewTruckLine {
                po_line_id: po_lines[0].po_line_id,
                item_id: po_lines[0].item_id,
                qty_expected: Some(po_lines[0].qty_ordered),
                description: None,
            }],
        )
        .await?;
    store
        .add_truck_update(
            truck.truck_id,
            &NewTruckUpdate {
                update_type: TruckUpdateType::Status,
                message: None,
                status: Some(TruckStatus::Arrived),
                po_line_id: None,
                item_id: None,
                quantity: None,
            },
            Some("dispatch"),
        )
        .await?;
    store
        .add_truck_update(
            truck.truck_id,
            &NewTruckUpdate {
                update_type: TruckUpdateType::LineProgress,
                message: None,
                status: None,
                po_line_id: Some(po_lines[0].po_line_id),
                item_id: None,
                quantity: Some(4.0),
            },
            Some("dock-1"),
        )
        .await?;

    // A second PO already partially received, so receiving activity and
    // a drafted bill exist.
    let received_po = store
        .create_po(
            widget_co.vendor_id,
            &[NewPoLine {
                item_id: items[2].item_id,
                description: items[2].description.clone(),
                qty_ordered: 8.0,
                unit_cost: items[2].unit_cost,
            }],
            None,
            "seed",
        )
        .await?;
    let received_lines = store.po_lines(received_po.po_id).await?;
    store
        .receive_po(
            received_po.po_id,
            &[ReceiveLine {
                po_line_id: received_lines[0].po_line_id,
                qty_received: 5.0,
                unit_cost: None,
            }],
            "dana",
        )
        .await?;

    // Tickets in every state the dashboards care about.
    store
        .create_sale(None, Some("floor-1"), Some("manual"))
        .await?;
    store.record_ocr_draft(148.5, 0.82, Some("scanner")).await?;

    let open_sale = store
        .create_sale(None, Some("floor-1"), Some("manual"))
        .await?;
    store
        .add_sale_line(open_sale.sale_id, &items[3], floor.location_id, 1.0, None)
        .await?;
    store.finalize_sale(open_sale.sale_id).await?;

    let fulfilled = store
        .create_sale(None, Some("floor-2"), Some("manual"))
        .await?;
    store
        .add_sale_line(fulfilled.sale_id, &items[0], floor.location_id, 2.0, None)
        .await?;
    store.finalize_sale(fulfilled.sale_id).await?;
    store
        .set_sale_status(fulfilled.sale_id, SaleStatus::Fulfilled)
        .await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_once_and_is_idempotent() {
        let store = Store::in_memory().await.unwrap();
        assert!(apply(&store).await.unwrap());
        assert!(!apply(&store).await.unwrap());

        let counts = store.dataset_counts().await.unwrap();
        assert_eq!(counts.items, 4);
        assert_eq!(counts.vendors, 2);
        assert!(counts.locations >= 3);
        assert_eq!(counts.customers, 2);

        // Trucks, open tickets, and receipts all exist for the dashboards.
        assert!(!store.list_trucks().await.unwrap().is_empty());
        assert!(!store
            .list_sales_by_status(SaleStatus::Open, 10)
            .await
            .unwrap()
            .is_empty());
        assert!(!store
            .list_sales_by_status(SaleStatus::Fulfilled, 10)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.list_invoices(None).await.unwrap().len(), 1);
    }
}
