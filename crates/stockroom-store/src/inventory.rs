//! Inventory movements
//!
//! Every quantity change lands twice: the `inventory` row is brought up
//! to date and an `inventory_txn` ledger entry records why.

use chrono::Utc;
use sqlx::SqliteConnection;
use stockroom_domain::{Inventory, InventoryTxn};
use stockroom_types::{InventoryReason, Result};

use crate::Store;

impl Store {
    pub async fn get_inventory(
        &self,
        item_id: i64,
        location_id: i64,
    ) -> Result<Option<Inventory>> {
        let inventory = sqlx::query_as::<_, Inventory>(
            "SELECT * FROM inventory WHERE item_id = ? AND location_id = ?",
        )
        .bind(item_id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inventory)
    }

    /// Movement ledger for an item, newest first.
    pub async fn inventory_txns_for_item(&self, item_id: i64) -> Result<Vec<InventoryTxn>> {
        let txns = sqlx::query_as::<_, InventoryTxn>(
            "SELECT * FROM inventory_txn WHERE item_id = ? ORDER BY created_at DESC, txn_id DESC",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(txns)
    }

    /// Apply `qty_delta` to the item/location pair, creating the
    /// inventory row if needed, and append a ledger entry.
    ///
    /// Returns `(inv_id, new_qty_on_hand)`.
    pub async fn adjust_inventory(
        &self,
        item_id: i64,
        location_id: i64,
        qty_delta: f64,
        reason: InventoryReason,
        created_by: Option<&str>,
    ) -> Result<(i64, f64)> {
        let mut tx = self.pool.begin().await?;
        let outcome = adjust_in_tx(
            &mut tx,
            item_id,
            location_id,
            qty_delta,
            reason,
            Some("manual_adjust"),
            None,
            None,
            created_by,
        )
        .await?;
        tx.commit().await?;
        Ok(outcome)
    }

    /// Move quantity between two locations atomically.
    pub async fn transfer_inventory(
        &self,
        item_id: i64,
        from_location_id: i64,
        to_location_id: i64,
        qty: f64,
        created_by: Option<&str>,
    ) -> Result<(i64, f64)> {
        let mut tx = self.pool.begin().await?;
        adjust_in_tx(
            &mut tx,
            item_id,
            from_location_id,
            -qty,
            InventoryReason::Transfer,
            Some("manual_adjust"),
            None,
            None,
            created_by,
        )
        .await?;
        let outcome = adjust_in_tx(
            &mut tx,
            item_id,
            to_location_id,
            qty,
            InventoryReason::Transfer,
            Some("manual_adjust"),
            None,
            None,
            created_by,
        )
        .await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn qty_on_hand(&self, item_id: i64, location_id: i64) -> Result<f64> {
        let row: Option<(f64,)> = sqlx::query_as(
            "SELECT qty_on_hand FROM inventory WHERE item_id = ? AND location_id = ?",
        )
        .bind(item_id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(qty,)| qty).unwrap_or(0.0))
    }

    pub async fn clear_inventory(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM inventory").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Set the absolute on-hand quantity for an item at a location,
    /// used by imports that state totals rather than deltas.
    pub async fn set_inventory_level(
        &self,
        item_id: i64,
        location_id: i64,
        qty_on_hand: f64,
        avg_cost: f64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO inventory (item_id, location_id, qty_on_hand, qty_reserved, avg_cost) \
             VALUES (?, ?, ?, 0, ?) \
             ON CONFLICT (item_id, location_id) \
             DO UPDATE SET qty_on_hand = excluded.qty_on_hand, avg_cost = excluded.avg_cost",
        )
        .bind(item_id)
        .bind(location_id)
        .bind(qty_on_hand)
        .bind(avg_cost)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Shared write path for inventory deltas, callable from other aggregates'
/// transactions (PO receiving, sale finalization). The ledger entry
/// records `unit_cost` when given, else the row's average cost.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn adjust_in_tx(
    conn: &mut SqliteConnection,
    item_id: i64,
    location_id: i64,
    qty_delta: f64,
    reason: InventoryReason,
    ref_type: Option<&str>,
    ref_id: Option<i64>,
    unit_cost: Option<f64>,
    created_by: Option<&str>,
) -> Result<(i64, f64)> {
    let existing: Option<(i64, f64, f64)> = sqlx::query_as(
        "SELECT inv_id, qty_on_hand, avg_cost FROM inventory \
         WHERE item_id = ? AND location_id = ?",
    )
    .bind(item_id)
    .bind(location_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (inv_id, new_qty, avg_cost) = match existing {
        Some((inv_id, qty_on_hand, avg_cost)) => {
            let new_qty = qty_on_hand + qty_delta;
            sqlx::query("UPDATE inventory SET qty_on_hand = ? WHERE inv_id = ?")
                .bind(new_qty)
                .bind(inv_id)
                .execute(&mut *conn)
                .await?;
            (inv_id, new_qty, avg_cost)
        }
        None => {
            let result = sqlx::query(
                "INSERT INTO inventory (item_id, location_id, qty_on_hand, qty_reserved, avg_cost) \
                 VALUES (?, ?, ?, 0, 0)",
            )
            .bind(item_id)
            .bind(location_id)
            .bind(qty_delta)
            .execute(&mut *conn)
            .await?;
            (result.last_insert_rowid(), qty_delta, 0.0)
        }
    };

    sqlx::query(
        "INSERT INTO inventory_txn \
         (item_id, location_id, qty_delta, reason, ref_type, ref_id, unit_cost, created_by, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item_id)
    .bind(location_id)
    .bind(qty_delta)
    .bind(reason)
    .bind(ref_type)
    .bind(ref_id)
    .bind(unit_cost.unwrap_or(avg_cost))
    .bind(created_by)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    Ok((inv_id, new_qty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewItem;
    use stockroom_types::LocationKind;

    async fn fixture(store: &Store) -> (i64, i64, i64) {
        let item = store
            .create_item(&NewItem {
                sku: "INV-001".to_string(),
                upc: None,
                description: "Counted thing".to_string(),
                category: None,
                subcategory: None,
                vendor_model: None,
                unit_cost: 2.0,
                price: 4.0,
                tax_code: None,
                short_code: "INV0".to_string(),
            })
            .await
            .unwrap();
        let (a, _) = store
            .get_or_create_location("Backroom", LocationKind::Backroom)
            .await
            .unwrap();
        let (b, _) = store
            .get_or_create_location("Floor", LocationKind::Floor)
            .await
            .unwrap();
        (item.item_id, a.location_id, b.location_id)
    }

    #[tokio::test]
    async fn adjust_creates_row_and_ledger_entry() {
        let store = Store::in_memory().await.unwrap();
        let (item_id, loc, _) = fixture(&store).await;

        let (_, qty) = store
            .adjust_inventory(item_id, loc, 5.0, InventoryReason::Adjust, Some("tester"))
            .await
            .unwrap();
        assert_eq!(qty, 5.0);
        let (_, qty) = store
            .adjust_inventory(item_id, loc, -2.0, InventoryReason::Adjust, None)
            .await
            .unwrap();
        assert_eq!(qty, 3.0);

        let row = store.get_inventory(item_id, loc).await.unwrap().unwrap();
        assert_eq!(row.qty_on_hand, 3.0);
        assert_eq!(row.qty_reserved, 0.0);

        let txns = store.inventory_txns_for_item(item_id).await.unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].qty_delta, -2.0);
        assert_eq!(txns[0].reason, InventoryReason::Adjust);
        assert_eq!(txns[1].created_by.as_deref(), Some("tester"));
    }

    #[tokio::test]
    async fn transfer_moves_quantity_between_locations() {
        let store = Store::in_memory().await.unwrap();
        let (item_id, from, to) = fixture(&store).await;
        store
            .adjust_inventory(item_id, from, 10.0, InventoryReason::Count, None)
            .await
            .unwrap();

        store
            .transfer_inventory(item_id, from, to, 4.0, Some("tester"))
            .await
            .unwrap();

        assert_eq!(store.qty_on_hand(item_id, from).await.unwrap(), 6.0);
        assert_eq!(store.qty_on_hand(item_id, to).await.unwrap(), 4.0);
    }
}
