//! Vendor bill queries

use chrono::NaiveDate;
use serde::Serialize;
use stockroom_domain::Bill;
use stockroom_types::{BillStatus, Result};

use crate::{like_pattern, Store};

/// Invoice listing entry with the vendor resolved.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InvoiceSummary {
    pub invoice_id: i64,
    pub vendor_name: Option<String>,
    pub po_id: Option<i64>,
    pub invoice_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub subtotal: f64,
    pub tax: f64,
    pub freight: f64,
    pub total: f64,
    pub status: BillStatus,
}

impl Store {
    pub async fn get_bill(&self, bill_id: i64) -> Result<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>("SELECT * FROM bill WHERE bill_id = ?")
            .bind(bill_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(bill)
    }

    /// Bills newest first, optionally filtered on vendor name, invoice
    /// number, or status, capped at 200 rows.
    pub async fn list_invoices(&self, q: Option<&str>) -> Result<Vec<InvoiceSummary>> {
        let base = "SELECT b.bill_id AS invoice_id, v.name AS vendor_name, b.po_id, \
                           b.invoice_no, b.bill_date, b.due_date, b.subtotal, b.tax, \
                           b.freight, b.total, b.status \
                    FROM bill b \
                    LEFT JOIN vendor v ON v.vendor_id = b.vendor_id";
        let invoices = match like_pattern(q) {
            Some(pattern) => {
                let sql = format!(
                    "{base} WHERE lower(coalesce(v.name, '')) LIKE ? \
                         OR lower(coalesce(b.invoice_no, '')) LIKE ? \
                         OR lower(b.status) LIKE ? \
                     ORDER BY b.bill_date DESC, b.bill_id DESC LIMIT 200"
                );
                sqlx::query_as::<_, InvoiceSummary>(&sql)
                    .bind(&pattern)
                    .bind(&pattern)
                    .bind(&pattern)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{base} ORDER BY b.bill_date DESC, b.bill_id DESC LIMIT 200");
                sqlx::query_as::<_, InvoiceSummary>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewPoLine, ReceiveLine};

    #[tokio::test]
    async fn receiving_drafts_show_up_in_invoice_listing() {
        let store = Store::in_memory().await.unwrap();
        let (vendor, _) = store.get_or_create_vendor("Widget Co").await.unwrap();
        let item = store
            .create_item(&crate::NewItem {
                sku: "BILL-1".to_string(),
                upc: None,
                description: "Billed widget".to_string(),
                category: None,
                subcategory: None,
                vendor_model: None,
                unit_cost: 5.0,
                price: 9.0,
                tax_code: None,
                short_code: "BIL1".to_string(),
            })
            .await
            .unwrap();
        let po = store
            .create_po(
                vendor.vendor_id,
                &[NewPoLine {
                    item_id: item.item_id,
                    description: "Billed widget".to_string(),
                    qty_ordered: 2.0,
                    unit_cost: 5.0,
                }],
                None,
                "tester",
            )
            .await
            .unwrap();
        let line_id = store.po_lines(po.po_id).await.unwrap()[0].po_line_id;
        let outcome = store
            .receive_po(
                po.po_id,
                &[ReceiveLine {
                    po_line_id: line_id,
                    qty_received: 2.0,
                    unit_cost: None,
                }],
                "tester",
            )
            .await
            .unwrap();

        let bill = store.get_bill(outcome.bill_id).await.unwrap().unwrap();
        assert_eq!(bill.po_id, Some(po.po_id));
        assert_eq!(bill.status, BillStatus::Draft);
        assert_eq!(bill.invoice_no, None);

        let all = store.list_invoices(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vendor_name.as_deref(), Some("Widget Co"));
        assert_eq!(all[0].status, BillStatus::Draft);
        assert!((all[0].total - 10.0).abs() < 1e-9);

        assert_eq!(store.list_invoices(Some("widget")).await.unwrap().len(), 1);
        assert!(store.list_invoices(Some("zzz")).await.unwrap().is_empty());
    }
}
