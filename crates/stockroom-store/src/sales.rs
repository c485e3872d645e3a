//! Sales ticket queries

use chrono::Utc;
use stockroom_domain::{Item, Sale, SaleLine};
use stockroom_types::{DeliveryStatus, Error, InventoryReason, Result, SaleStatus};

use crate::Store;

impl Store {
    pub async fn create_sale(
        &self,
        customer_id: Option<i64>,
        created_by: Option<&str>,
        source: Option<&str>,
    ) -> Result<Sale> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO sale (customer_id, status, sale_date, created_by, source, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer_id)
        .bind(SaleStatus::Draft)
        .bind(now)
        .bind(created_by)
        .bind(source)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_sale(result.last_insert_rowid())
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    /// Store a draft captured by the OCR ticket pipeline. The totals are
    /// whatever OCR read; review happens before the ticket opens.
    pub async fn record_ocr_draft(
        &self,
        total: f64,
        ocr_confidence: f64,
        created_by: Option<&str>,
    ) -> Result<Sale> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO sale (status, sale_date, subtotal, total, created_by, source, ocr_confidence, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 'ocr_ticket', ?, ?, ?)",
        )
        .bind(SaleStatus::Draft)
        .bind(now)
        .bind(total)
        .bind(total)
        .bind(created_by)
        .bind(ocr_confidence)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_sale(result.last_insert_rowid())
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    pub async fn get_sale(&self, sale_id: i64) -> Result<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sale WHERE sale_id = ?")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    pub async fn sale_lines(&self, sale_id: i64) -> Result<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            "SELECT * FROM sale_line WHERE sale_id = ? ORDER BY sale_line_id ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// Append a line and roll the ticket totals forward. The line prices
    /// at the item's current price unless `unit_price` overrides it.
    pub async fn add_sale_line(
        &self,
        sale_id: i64,
        item: &Item,
        location_id: i64,
        qty: f64,
        unit_price: Option<f64>,
    ) -> Result<SaleLine> {
        let sale = self
            .get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        let unit_price = unit_price.unwrap_or(item.price);

        let mut tx = self.pool.begin().await?;
        let line_id = sqlx::query(
            "INSERT INTO sale_line (sale_id, item_id, location_id, qty, unit_price) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(sale_id)
        .bind(item.item_id)
        .bind(location_id)
        .bind(qty)
        .bind(unit_price)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let subtotal = sale.subtotal + unit_price * qty;
        sqlx::query("UPDATE sale SET subtotal = ?, total = ?, updated_at = ? WHERE sale_id = ?")
            .bind(subtotal)
            .bind(subtotal)
            .bind(Utc::now())
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let line = sqlx::query_as::<_, SaleLine>("SELECT * FROM sale_line WHERE sale_line_id = ?")
            .bind(line_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(line)
    }

    /// Open the ticket and post a negative inventory movement per line.
    pub async fn finalize_sale(&self, sale_id: i64) -> Result<(Sale, Vec<SaleLine>)> {
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        let lines = self.sale_lines(sale_id).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE sale SET status = ?, sale_date = ?, updated_at = ? WHERE sale_id = ?")
            .bind(SaleStatus::Open)
            .bind(now)
            .bind(now)
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        for line in &lines {
            crate::inventory::adjust_in_tx(
                &mut tx,
                line.item_id,
                line.location_id,
                -line.qty,
                InventoryReason::Sale,
                Some("sale"),
                Some(sale_id),
                Some(line.unit_price),
                None,
            )
            .await?;
        }
        tx.commit().await?;

        let sale = self
            .get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        Ok((sale, lines))
    }

    pub async fn set_sale_status(&self, sale_id: i64, status: SaleStatus) -> Result<Sale> {
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        let now = Utc::now();
        match status {
            // Approving re-opens the ticket as of now.
            SaleStatus::Open => {
                sqlx::query(
                    "UPDATE sale SET status = ?, sale_date = ?, updated_at = ? WHERE sale_id = ?",
                )
                .bind(status)
                .bind(now)
                .bind(now)
                .bind(sale_id)
                .execute(&self.pool)
                .await?;
            }
            _ => {
                sqlx::query("UPDATE sale SET status = ?, updated_at = ? WHERE sale_id = ?")
                    .bind(status)
                    .bind(now)
                    .bind(sale_id)
                    .execute(&self.pool)
                    .await?;
            }
        }
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    /// Send a rejected ticket back to draft and drop its delivery flag.
    pub async fn reject_sale(&self, sale_id: i64) -> Result<Sale> {
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        sqlx::query(
            "UPDATE sale SET status = ?, delivery_requested = 0, updated_at = ? WHERE sale_id = ?",
        )
        .bind(SaleStatus::Draft)
        .bind(Utc::now())
        .bind(sale_id)
        .execute(&self.pool)
        .await?;
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    pub async fn set_delivery_request(&self, sale_id: i64, requested: bool) -> Result<Sale> {
        let sale = self
            .get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        let delivery_status = if requested {
            Some(sale.delivery_status.unwrap_or(DeliveryStatus::Queued))
        } else {
            None
        };
        sqlx::query(
            "UPDATE sale SET delivery_requested = ?, delivery_status = ?, updated_at = ? \
             WHERE sale_id = ?",
        )
        .bind(requested)
        .bind(delivery_status)
        .bind(Utc::now())
        .bind(sale_id)
        .execute(&self.pool)
        .await?;
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    pub async fn set_delivery_status(
        &self,
        sale_id: i64,
        status: DeliveryStatus,
    ) -> Result<Sale> {
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))?;
        sqlx::query("UPDATE sale SET delivery_status = ?, updated_at = ? WHERE sale_id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(sale_id)
            .execute(&self.pool)
            .await?;
        self.get_sale(sale_id)
            .await?
            .ok_or(Error::NotFound("sale_not_found"))
    }

    pub async fn list_sales_by_status(&self, status: SaleStatus, limit: i64) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sale WHERE status = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(status)
        .bind(limit.clamp(1, 200))
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewItem;
    use stockroom_types::LocationKind;

    async fn item_and_location(store: &Store) -> (Item, i64) {
        let item = store
            .create_item(&NewItem {
                sku: "SKU-ABC".to_string(),
                upc: None,
                description: "Barcode Item".to_string(),
                category: None,
                subcategory: None,
                vendor_model: None,
                unit_cost: 10.0,
                price: 20.0,
                tax_code: None,
                short_code: "SC12".to_string(),
            })
            .await
            .unwrap();
        let (location, _) = store
            .get_or_create_location("Showroom", LocationKind::Retail)
            .await
            .unwrap();
        (item, location.location_id)
    }

    #[tokio::test]
    async fn add_line_rolls_totals_forward() {
        let store = Store::in_memory().await.unwrap();
        let (item, location_id) = item_and_location(&store).await;
        let sale = store
            .create_sale(None, Some("tester"), Some("manual"))
            .await
            .unwrap();

        store
            .add_sale_line(sale.sale_id, &item, location_id, 2.0, None)
            .await
            .unwrap();

        let sale = store.get_sale(sale.sale_id).await.unwrap().unwrap();
        assert!((sale.total - 40.0).abs() < 1e-9);
        assert_eq!(sale.status, SaleStatus::Draft);
    }

    #[tokio::test]
    async fn finalize_opens_the_ticket_and_moves_inventory() {
        let store = Store::in_memory().await.unwrap();
        let (item, location_id) = item_and_location(&store).await;
        store
            .adjust_inventory(item.item_id, location_id, 5.0, InventoryReason::Count, None)
            .await
            .unwrap();
        let sale = store
            .create_sale(None, Some("tester"), Some("manual"))
            .await
            .unwrap();
        store
            .add_sale_line(sale.sale_id, &item, location_id, 1.0, None)
            .await
            .unwrap();

        let (finalized, lines) = store.finalize_sale(sale.sale_id).await.unwrap();
        assert_eq!(finalized.status, SaleStatus::Open);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            store.qty_on_hand(item.item_id, location_id).await.unwrap(),
            4.0
        );

        let missing = store.finalize_sale(sale.sale_id + 99).await.unwrap_err();
        assert!(matches!(missing, Error::NotFound("sale_not_found")));
    }

    #[tokio::test]
    async fn delivery_request_queues_and_clears() {
        let store = Store::in_memory().await.unwrap();
        let sale = store.create_sale(None, None, None).await.unwrap();

        let sale = store
            .set_delivery_request(sale.sale_id, true)
            .await
            .unwrap();
        assert!(sale.delivery_requested);
        assert_eq!(sale.delivery_status, Some(DeliveryStatus::Queued));

        let sale = store
            .set_delivery_status(sale.sale_id, DeliveryStatus::OutForDelivery)
            .await
            .unwrap();
        assert_eq!(sale.delivery_status, Some(DeliveryStatus::OutForDelivery));

        let sale = store
            .set_delivery_request(sale.sale_id, false)
            .await
            .unwrap();
        assert!(!sale.delivery_requested);
        assert_eq!(sale.delivery_status, None);
    }
}
