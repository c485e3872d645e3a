//! Purchase order queries
//!
//! Receiving is the hot path: it must reject payload lines that belong to
//! a different PO and leave nothing behind when it does, so the whole
//! receipt (lines, ledger entries, drafted bill, status advance) runs in
//! one transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockroom_domain::{PoLine, PurchaseOrder, ReceivingLine};
use stockroom_types::{Error, InventoryReason, PoStatus, Result};

use crate::locations::receiving_location_id;
use crate::{like_pattern, Store};

#[derive(Debug, Clone)]
pub struct NewPoLine {
    pub item_id: i64,
    pub description: String,
    pub qty_ordered: f64,
    pub unit_cost: f64,
}

/// Partial update for a PO header; `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct PoPatch {
    pub status: Option<PoStatus>,
    pub expected_date: Option<DateTime<Utc>>,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

/// One payload line of a receipt.
#[derive(Debug, Clone)]
pub struct ReceiveLine {
    pub po_line_id: i64,
    pub qty_received: f64,
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiveOutcome {
    pub receipt_id: i64,
    pub bill_id: i64,
    pub po_status: PoStatus,
}

/// Aggregated list entry for the PO dashboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PoSummary {
    pub po_id: i64,
    pub status: PoStatus,
    pub vendor_name: Option<String>,
    pub expected_date: Option<DateTime<Utc>>,
    pub total_lines: i64,
    pub open_lines: i64,
    pub received_lines: i64,
    pub qty_ordered: f64,
    pub qty_received: f64,
    pub notes: Option<String>,
}

/// Search hit for the receiving workspace's PO-line picker.
#[derive(Debug, Clone, Serialize)]
pub struct PoLineSearchResult {
    pub po_id: i64,
    pub po_number: String,
    pub po_line_id: i64,
    pub item_id: i64,
    pub item_description: String,
    pub vendor: Option<String>,
    pub qty_ordered: f64,
    pub qty_remaining: f64,
}

#[derive(sqlx::FromRow)]
struct PoLineSearchRow {
    po_id: i64,
    external_ref: Option<String>,
    po_line_id: i64,
    item_id: i64,
    item_description: String,
    vendor: Option<String>,
    qty_ordered: f64,
    qty_received: f64,
}

impl Store {
    pub async fn create_po(
        &self,
        vendor_id: i64,
        lines: &[NewPoLine],
        notes: Option<&str>,
        created_by: &str,
    ) -> Result<PurchaseOrder> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO po (vendor_id, status, notes, created_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(vendor_id)
        .bind(PoStatus::Open)
        .bind(notes)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let po_id = result.last_insert_rowid();

        for line in lines {
            sqlx::query(
                "INSERT INTO po_line (po_id, item_id, description, qty_ordered, qty_received, unit_cost) \
                 VALUES (?, ?, ?, ?, 0, ?)",
            )
            .bind(po_id)
            .bind(line.item_id)
            .bind(&line.description)
            .bind(line.qty_ordered)
            .bind(line.unit_cost)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        self.get_po(po_id)
            .await?
            .ok_or(Error::NotFound("not_found"))
    }

    /// Header-only insert used by the dataset importer, which carries
    /// source-system references and statuses the API create path does not.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_po(
        &self,
        vendor_id: i64,
        status: PoStatus,
        expected_date: Option<DateTime<Utc>>,
        terms: Option<&str>,
        notes: Option<&str>,
        created_by: &str,
        external_ref: Option<&str>,
    ) -> Result<PurchaseOrder> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO po (vendor_id, status, expected_date, terms, notes, created_by, external_ref, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(vendor_id)
        .bind(status)
        .bind(expected_date)
        .bind(terms)
        .bind(notes)
        .bind(created_by)
        .bind(external_ref)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_po(result.last_insert_rowid())
            .await?
            .ok_or(Error::NotFound("not_found"))
    }

    pub async fn add_po_line(&self, po_id: i64, line: &NewPoLine) -> Result<PoLine> {
        let result = sqlx::query(
            "INSERT INTO po_line (po_id, item_id, description, qty_ordered, qty_received, unit_cost) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(po_id)
        .bind(line.item_id)
        .bind(&line.description)
        .bind(line.qty_ordered)
        .bind(line.unit_cost)
        .execute(&self.pool)
        .await?;
        self.get_po_line(result.last_insert_rowid())
            .await?
            .ok_or(Error::NotFound("not_found"))
    }

    pub async fn get_po(&self, po_id: i64) -> Result<Option<PurchaseOrder>> {
        let po = sqlx::query_as::<_, PurchaseOrder>("SELECT * FROM po WHERE po_id = ?")
            .bind(po_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(po)
    }

    pub async fn po_lines(&self, po_id: i64) -> Result<Vec<PoLine>> {
        let lines = sqlx::query_as::<_, PoLine>(
            "SELECT * FROM po_line WHERE po_id = ? ORDER BY po_line_id ASC",
        )
        .bind(po_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    pub async fn get_po_line(&self, po_line_id: i64) -> Result<Option<PoLine>> {
        let line = sqlx::query_as::<_, PoLine>("SELECT * FROM po_line WHERE po_line_id = ?")
            .bind(po_line_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(line)
    }

    pub async fn patch_po(&self, po_id: i64, patch: PoPatch) -> Result<PurchaseOrder> {
        let mut po = self
            .get_po(po_id)
            .await?
            .ok_or(Error::NotFound("not_found"))?;
        if let Some(status) = patch.status {
            po.status = status;
        }
        if patch.expected_date.is_some() {
            po.expected_date = patch.expected_date;
        }
        if patch.terms.is_some() {
            po.terms = patch.terms;
        }
        if patch.notes.is_some() {
            po.notes = patch.notes;
        }
        sqlx::query(
            "UPDATE po SET status = ?, expected_date = ?, terms = ?, notes = ?, updated_at = ? \
             WHERE po_id = ?",
        )
        .bind(po.status)
        .bind(po.expected_date)
        .bind(&po.terms)
        .bind(&po.notes)
        .bind(Utc::now())
        .bind(po_id)
        .execute(&self.pool)
        .await?;
        self.get_po(po_id)
            .await?
            .ok_or(Error::NotFound("not_found"))
    }

    pub async fn list_po_summaries(&self) -> Result<Vec<PoSummary>> {
        let summaries = sqlx::query_as::<_, PoSummary>(
            "SELECT p.po_id, p.status, v.name AS vendor_name, p.expected_date, p.notes, \
                    COUNT(l.po_line_id) AS total_lines, \
                    COALESCE(SUM(CASE WHEN l.qty_received < l.qty_ordered THEN 1 ELSE 0 END), 0) AS open_lines, \
                    COALESCE(SUM(CASE WHEN l.qty_received >= l.qty_ordered THEN 1 ELSE 0 END), 0) AS received_lines, \
                    COALESCE(SUM(l.qty_ordered), 0) AS qty_ordered, \
                    COALESCE(SUM(l.qty_received), 0) AS qty_received \
             FROM po p \
             LEFT JOIN vendor v ON v.vendor_id = p.vendor_id \
             LEFT JOIN po_line l ON l.po_id = p.po_id \
             GROUP BY p.po_id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    /// Post a receipt. Every payload line must belong to the PO; on any
    /// mismatch the transaction rolls back and nothing is persisted.
    pub async fn receive_po(
        &self,
        po_id: i64,
        lines: &[ReceiveLine],
        received_by: &str,
    ) -> Result<ReceiveOutcome> {
        let po = self
            .get_po(po_id)
            .await?
            .ok_or(Error::NotFound("not_found"))?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let receipt_id = sqlx::query(
            "INSERT INTO receiving (po_id, received_at, received_by) VALUES (?, ?, ?)",
        )
        .bind(po_id)
        .bind(now)
        .bind(received_by)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let location_id = receiving_location_id(&mut tx).await?;

        let mut subtotal = 0.0;
        for payload in lines {
            let line: Option<PoLine> =
                sqlx::query_as("SELECT * FROM po_line WHERE po_line_id = ?")
                    .bind(payload.po_line_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let line = match line {
                Some(line) if line.po_id == po_id => line,
                _ => return Err(Error::Validation("po_line_mismatch")),
            };

            let qty = payload.qty_received;
            let unit_cost = payload.unit_cost.unwrap_or(line.unit_cost);

            sqlx::query("UPDATE po_line SET qty_received = qty_received + ? WHERE po_line_id = ?")
                .bind(qty)
                .bind(line.po_line_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "INSERT INTO receiving_line (receipt_id, po_line_id, item_id, qty_received, unit_cost) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(receipt_id)
            .bind(line.po_line_id)
            .bind(line.item_id)
            .bind(qty)
            .bind(unit_cost)
            .execute(&mut *tx)
            .await?;

            crate::inventory::adjust_in_tx(
                &mut tx,
                line.item_id,
                location_id,
                qty,
                InventoryReason::Receive,
                Some("receiving"),
                Some(receipt_id),
                Some(unit_cost),
                Some(received_by),
            )
            .await?;

            subtotal += qty * unit_cost;
        }

        let bill_id = sqlx::query(
            "INSERT INTO bill (vendor_id, po_id, subtotal, total, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(po.vendor_id)
        .bind(po_id)
        .bind(subtotal)
        .bind(subtotal)
        .bind(stockroom_types::BillStatus::Draft)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        // Status advances off the post-update line totals.
        let (open_lines,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM po_line WHERE po_id = ? AND qty_received < qty_ordered",
        )
        .bind(po_id)
        .fetch_one(&mut *tx)
        .await?;
        let po_status = if open_lines == 0 {
            PoStatus::Received
        } else {
            PoStatus::Partial
        };
        sqlx::query("UPDATE po SET status = ?, updated_at = ? WHERE po_id = ?")
            .bind(po_status)
            .bind(now)
            .bind(po_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ReceiveOutcome {
            receipt_id,
            bill_id,
            po_status,
        })
    }

    pub async fn receiving_lines(&self, receipt_id: i64) -> Result<Vec<ReceivingLine>> {
        let lines = sqlx::query_as::<_, ReceivingLine>(
            "SELECT * FROM receiving_line WHERE receipt_id = ? ORDER BY receipt_line_id ASC",
        )
        .bind(receipt_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// PO-line picker search: open lines of open/partial POs, matched on
    /// PO number, item description, SKU, or vendor name.
    pub async fn search_po_lines(&self, q: &str, limit: i64) -> Result<Vec<PoLineSearchResult>> {
        let limit = limit.clamp(1, 100);
        let base = "SELECT p.po_id, p.external_ref, l.po_line_id, l.item_id, \
                           i.description AS item_description, v.name AS vendor, \
                           l.qty_ordered, l.qty_received \
                    FROM po_line l \
                    JOIN po p ON p.po_id = l.po_id \
                    JOIN item i ON i.item_id = l.item_id \
                    LEFT JOIN vendor v ON v.vendor_id = p.vendor_id \
                    WHERE p.status IN ('open', 'partial') AND l.qty_received < l.qty_ordered";
        let rows = match like_pattern(Some(q)) {
            Some(pattern) => {
                let sql = format!(
                    "{base} AND (lower(coalesce(p.external_ref, 'po-' || p.po_id)) LIKE ? \
                         OR lower(i.description) LIKE ? \
                         OR lower(i.sku) LIKE ? \
                         OR lower(coalesce(v.name, '')) LIKE ?) \
                     ORDER BY p.po_id ASC, l.po_line_id ASC LIMIT ?"
                );
                sqlx::query_as::<_, PoLineSearchRow>(&sql)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{base} ORDER BY p.po_id ASC, l.po_line_id ASC LIMIT ?");
                sqlx::query_as::<_, PoLineSearchRow>(&sql)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| PoLineSearchResult {
                po_number: row
                    .external_ref
                    .clone()
                    .unwrap_or_else(|| format!("PO-{}", row.po_id)),
                po_id: row.po_id,
                po_line_id: row.po_line_id,
                item_id: row.item_id,
                item_description: row.item_description,
                vendor: row.vendor,
                qty_ordered: row.qty_ordered,
                qty_remaining: (row.qty_ordered - row.qty_received).max(0.0),
            })
            .collect())
    }
}
