//! Catalog item queries

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockroom_domain::{Barcode, Item};
use stockroom_types::{BarcodeKind, PoStatus, Result};

use crate::{in_placeholders, like_pattern, Store};

/// Fields accepted when staging a new catalog item. The short code is
/// assigned by the caller (see `stockroom_domain::service::short_code`).
#[derive(Debug, Clone)]
pub struct NewItem {
    pub sku: String,
    pub upc: Option<String>,
    pub description: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub vendor_model: Option<String>,
    pub unit_cost: f64,
    pub price: f64,
    pub tax_code: Option<String>,
    pub short_code: String,
}

/// Catalog listing entry: an item plus where its stock sits.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub item_id: i64,
    pub sku: String,
    pub description: String,
    pub vendor_model: Option<String>,
    pub total_on_hand: f64,
    pub top_location: Option<CatalogLocation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogLocation {
    pub location_id: i64,
    pub location_name: String,
    pub qty_on_hand: f64,
}

/// Per-location quantity for one item.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ItemLocation {
    pub location_id: i64,
    pub location_name: String,
    pub qty_on_hand: f64,
    pub qty_reserved: f64,
}

/// An open PO line bringing more of an item in.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IncomingPoLine {
    pub po_id: i64,
    pub status: PoStatus,
    pub expected_date: Option<DateTime<Utc>>,
    pub vendor_name: Option<String>,
    pub qty_ordered: f64,
    pub qty_received: f64,
}

#[derive(sqlx::FromRow)]
struct InventoryJoinRow {
    item_id: i64,
    qty_on_hand: f64,
    location_id: Option<i64>,
    location_name: Option<String>,
}

impl Store {
    pub async fn create_item(&self, new: &NewItem) -> Result<Item> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO item (sku, upc, description, category, subcategory, vendor_model, \
             unit_cost, price, tax_code, active, short_code, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?)",
        )
        .bind(&new.sku)
        .bind(&new.upc)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.subcategory)
        .bind(&new.vendor_model)
        .bind(new.unit_cost)
        .bind(new.price)
        .bind(&new.tax_code)
        .bind(&new.short_code)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_item(result.last_insert_rowid())
            .await?
            .ok_or(stockroom_types::Error::NotFound("item_not_found"))
    }

    /// Rewrite every mutable column from the given row.
    pub async fn update_item(&self, item: &Item) -> Result<()> {
        sqlx::query(
            "UPDATE item SET description = ?, category = ?, subcategory = ?, vendor_model = ?, \
             unit_cost = ?, price = ?, tax_code = ?, active = ?, updated_at = ? \
             WHERE item_id = ?",
        )
        .bind(&item.description)
        .bind(&item.category)
        .bind(&item.subcategory)
        .bind(&item.vendor_model)
        .bind(item.unit_cost)
        .bind(item.price)
        .bind(&item.tax_code)
        .bind(item.active)
        .bind(Utc::now())
        .bind(item.item_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_item(&self, item_id: i64) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE item_id = ?")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn find_item_by_sku(&self, sku: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE lower(sku) = lower(?)")
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn find_item_by_short_code(&self, code: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE short_code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn find_item_by_barcode(&self, barcode: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT i.* FROM item i JOIN barcode b ON b.item_id = i.item_id WHERE b.barcode = ?",
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn add_barcode(&self, item_id: i64, barcode: &str, kind: BarcodeKind) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO barcode (barcode, item_id, kind) VALUES (?, ?, ?)")
            .bind(barcode)
            .bind(item_id)
            .bind(kind)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn item_barcodes(&self, item_id: i64) -> Result<Vec<Barcode>> {
        let barcodes =
            sqlx::query_as::<_, Barcode>("SELECT * FROM barcode WHERE item_id = ? ORDER BY barcode")
                .bind(item_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(barcodes)
    }

    /// Substring search over sku / description / short code, capped at 20.
    pub async fn search_items(&self, q: &str) -> Result<Vec<Item>> {
        let Some(pattern) = like_pattern(Some(q)) else {
            return Ok(Vec::new());
        };
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM item \
             WHERE lower(sku) LIKE ? OR lower(description) LIKE ? OR lower(short_code) LIKE ? \
             ORDER BY description ASC LIMIT 20",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Active items with total on-hand and the best-stocked location.
    pub async fn catalog(&self, q: Option<&str>, limit: i64) -> Result<Vec<CatalogEntry>> {
        let limit = limit.clamp(1, 100);
        let items = match like_pattern(q) {
            Some(pattern) => {
                sqlx::query_as::<_, Item>(
                    "SELECT * FROM item WHERE active = 1 \
                     AND (lower(sku) LIKE ? OR lower(description) LIKE ?) \
                     ORDER BY description ASC LIMIT ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>(
                    "SELECT * FROM item WHERE active = 1 ORDER BY description ASC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT inv.item_id, inv.qty_on_hand, l.location_id, l.name AS location_name \
             FROM inventory inv \
             LEFT JOIN location l ON l.location_id = inv.location_id \
             WHERE inv.item_id IN ({})",
            in_placeholders(items.len())
        );
        let mut query = sqlx::query_as::<_, InventoryJoinRow>(&sql);
        for item in &items {
            query = query.bind(item.item_id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let mut totals: HashMap<i64, f64> = HashMap::new();
        let mut top: HashMap<i64, CatalogLocation> = HashMap::new();
        for row in rows {
            *totals.entry(row.item_id).or_insert(0.0) += row.qty_on_hand;
            if let (Some(location_id), Some(location_name)) = (row.location_id, row.location_name) {
                let better = top
                    .get(&row.item_id)
                    .map(|current| row.qty_on_hand > current.qty_on_hand)
                    .unwrap_or(true);
                if better {
                    top.insert(
                        row.item_id,
                        CatalogLocation {
                            location_id,
                            location_name,
                            qty_on_hand: row.qty_on_hand,
                        },
                    );
                }
            }
        }

        Ok(items
            .into_iter()
            .map(|item| CatalogEntry {
                total_on_hand: totals.get(&item.item_id).copied().unwrap_or(0.0),
                top_location: top.remove(&item.item_id),
                item_id: item.item_id,
                sku: item.sku,
                description: item.description,
                vendor_model: item.vendor_model,
            })
            .collect())
    }

    pub async fn item_locations(&self, item_id: i64) -> Result<Vec<ItemLocation>> {
        let rows = sqlx::query_as::<_, ItemLocation>(
            "SELECT l.location_id, l.name AS location_name, inv.qty_on_hand, inv.qty_reserved \
             FROM location l \
             JOIN inventory inv ON inv.location_id = l.location_id \
             WHERE inv.item_id = ? ORDER BY l.name ASC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open/partial PO lines still bringing this item in.
    pub async fn incoming_for_item(&self, item_id: i64) -> Result<Vec<IncomingPoLine>> {
        let rows = sqlx::query_as::<_, IncomingPoLine>(
            "SELECT p.po_id, p.status, p.expected_date, v.name AS vendor_name, \
                    l.qty_ordered, l.qty_received \
             FROM po_line l \
             JOIN po p ON p.po_id = l.po_id \
             LEFT JOIN vendor v ON v.vendor_id = p.vendor_id \
             WHERE l.item_id = ? AND l.qty_received < l.qty_ordered \
               AND p.status IN ('open', 'partial') \
             ORDER BY p.expected_date ASC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every short code currently assigned.
    pub async fn short_codes_in_use(&self) -> Result<HashSet<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT short_code FROM item")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(sku: &str, code: &str) -> NewItem {
        NewItem {
            sku: sku.to_string(),
            upc: None,
            description: format!("{sku} widget"),
            category: None,
            subcategory: None,
            vendor_model: None,
            unit_cost: 5.0,
            price: 10.0,
            tax_code: None,
            short_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn lookups_by_sku_short_code_and_barcode() {
        let store = Store::in_memory().await.unwrap();
        let item = store.create_item(&widget("WID-001", "WID0")).await.unwrap();
        store
            .add_barcode(item.item_id, "012345678905", BarcodeKind::Item)
            .await
            .unwrap();

        assert!(store.find_item_by_sku("wid-001").await.unwrap().is_some());
        assert!(store.find_item_by_short_code("WID0").await.unwrap().is_some());
        let scanned = store.find_item_by_barcode("012345678905").await.unwrap();
        assert_eq!(scanned.unwrap().item_id, item.item_id);
        assert!(store.find_item_by_barcode("nope").await.unwrap().is_none());

        let barcodes = store.item_barcodes(item.item_id).await.unwrap();
        assert_eq!(barcodes.len(), 1);
        assert_eq!(barcodes[0].kind, BarcodeKind::Item);
    }

    #[tokio::test]
    async fn catalog_reports_totals_and_top_location() {
        let store = Store::in_memory().await.unwrap();
        let item = store.create_item(&widget("WID-001", "WID0")).await.unwrap();
        let (floor, _) = store
            .get_or_create_location("Showroom", stockroom_types::LocationKind::Floor)
            .await
            .unwrap();
        let (back, _) = store
            .get_or_create_location("Backroom", stockroom_types::LocationKind::Backroom)
            .await
            .unwrap();
        store
            .adjust_inventory(item.item_id, floor.location_id, 3.0, stockroom_types::InventoryReason::Adjust, None)
            .await
            .unwrap();
        store
            .adjust_inventory(item.item_id, back.location_id, 9.0, stockroom_types::InventoryReason::Adjust, None)
            .await
            .unwrap();

        let catalog = store.catalog(Some("wid"), 50).await.unwrap();
        assert_eq!(catalog.len(), 1);
        let entry = &catalog[0];
        assert!((entry.total_on_hand - 12.0).abs() < 1e-9);
        assert_eq!(
            entry.top_location.as_ref().unwrap().location_name,
            "Backroom"
        );
    }
}
