//! Incoming truck queries
//!
//! Trucks hang off a purchase order; expected lines and update entries
//! must reference lines of that PO. Validation happens here so the API
//! and any future callers agree on the rules.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use stockroom_domain::{IncomingTruck, PoLine, TruckLine, TruckUpdate};
use stockroom_types::{Error, Result, TruckStatus, TruckUpdateType};

use crate::{in_placeholders, Store};

#[derive(Debug, Clone)]
pub struct NewTruckLine {
    pub po_line_id: i64,
    pub item_id: i64,
    pub qty_expected: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTruckUpdate {
    pub update_type: TruckUpdateType,
    pub message: Option<String>,
    pub status: Option<TruckStatus>,
    pub po_line_id: Option<i64>,
    pub item_id: Option<i64>,
    pub quantity: Option<f64>,
}

impl Store {
    pub async fn create_truck(
        &self,
        po_id: i64,
        reference: &str,
        carrier: Option<&str>,
        status: TruckStatus,
        scheduled_arrival: Option<DateTime<Utc>>,
        lines: &[NewTruckLine],
    ) -> Result<IncomingTruck> {
        self.get_po(po_id)
            .await?
            .ok_or(Error::NotFound("po_not_found"))?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let truck_id = sqlx::query(
            "INSERT INTO incoming_truck \
             (po_id, reference, carrier, status, scheduled_arrival, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(po_id)
        .bind(reference)
        .bind(carrier)
        .bind(status)
        .bind(scheduled_arrival)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for line in lines {
            let po_line: Option<PoLine> =
                sqlx::query_as("SELECT * FROM po_line WHERE po_line_id = ?")
                    .bind(line.po_line_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let po_line = match po_line {
                Some(po_line) if po_line.po_id == po_id => po_line,
                _ => return Err(Error::Validation("po_line_mismatch")),
            };
            if line.item_id != po_line.item_id {
                return Err(Error::Validation("item_mismatch"));
            }

            let description = line
                .description
                .clone()
                .unwrap_or_else(|| po_line.description.clone());
            sqlx::query(
                "INSERT INTO incoming_truck_line \
                 (truck_id, po_line_id, item_id, description, qty_expected) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(truck_id)
            .bind(po_line.po_line_id)
            .bind(line.item_id)
            .bind(description)
            .bind(line.qty_expected)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        self.get_truck(truck_id)
            .await?
            .ok_or(Error::NotFound("truck_not_found"))
    }

    pub async fn get_truck(&self, truck_id: i64) -> Result<Option<IncomingTruck>> {
        let truck =
            sqlx::query_as::<_, IncomingTruck>("SELECT * FROM incoming_truck WHERE truck_id = ?")
                .bind(truck_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(truck)
    }

    /// All trucks, newest first.
    pub async fn list_trucks(&self) -> Result<Vec<IncomingTruck>> {
        let trucks = sqlx::query_as::<_, IncomingTruck>(
            "SELECT * FROM incoming_truck ORDER BY created_at DESC, truck_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(trucks)
    }

    pub async fn truck_lines(&self, truck_id: i64) -> Result<Vec<TruckLine>> {
        let lines = sqlx::query_as::<_, TruckLine>(
            "SELECT * FROM incoming_truck_line WHERE truck_id = ? ORDER BY truck_line_id ASC",
        )
        .bind(truck_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// Update stream in creation order.
    pub async fn truck_updates(&self, truck_id: i64) -> Result<Vec<TruckUpdate>> {
        let updates = sqlx::query_as::<_, TruckUpdate>(
            "SELECT * FROM incoming_truck_update WHERE truck_id = ? \
             ORDER BY created_at ASC, update_id ASC",
        )
        .bind(truck_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(updates)
    }

    /// Expected lines for a batch of trucks, keyed by truck id.
    pub async fn truck_lines_for(
        &self,
        truck_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<TruckLine>>> {
        if truck_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT * FROM incoming_truck_line WHERE truck_id IN ({}) ORDER BY truck_line_id ASC",
            in_placeholders(truck_ids.len())
        );
        let mut query = sqlx::query_as::<_, TruckLine>(&sql);
        for truck_id in truck_ids {
            query = query.bind(truck_id);
        }
        let mut grouped: HashMap<i64, Vec<TruckLine>> = HashMap::new();
        for line in query.fetch_all(&self.pool).await? {
            grouped.entry(line.truck_id).or_default().push(line);
        }
        Ok(grouped)
    }

    /// Update streams for a batch of trucks, keyed by truck id, each in
    /// creation order.
    pub async fn truck_updates_for(
        &self,
        truck_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<TruckUpdate>>> {
        if truck_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT * FROM incoming_truck_update WHERE truck_id IN ({}) \
             ORDER BY created_at ASC, update_id ASC",
            in_placeholders(truck_ids.len())
        );
        let mut query = sqlx::query_as::<_, TruckUpdate>(&sql);
        for truck_id in truck_ids {
            query = query.bind(truck_id);
        }
        let mut grouped: HashMap<i64, Vec<TruckUpdate>> = HashMap::new();
        for update in query.fetch_all(&self.pool).await? {
            grouped.entry(update.truck_id).or_default().push(update);
        }
        Ok(grouped)
    }

    /// Append an update to a truck's stream, enforcing PO linkage.
    ///
    /// A status update also moves the truck itself; the first `arrived`
    /// status stamps `arrived_at`.
    pub async fn add_truck_update(
        &self,
        truck_id: i64,
        update: &NewTruckUpdate,
        created_by: Option<&str>,
    ) -> Result<TruckUpdate> {
        let truck = self
            .get_truck(truck_id)
            .await?
            .ok_or(Error::NotFound("truck_not_found"))?;

        let mut item_id = update.item_id;
        if let Some(po_line_id) = update.po_line_id {
            let po_line = self
                .get_po_line(po_line_id)
                .await?
                .filter(|line| line.po_id == truck.po_id)
                .ok_or(Error::Validation("po_line_mismatch"))?;
            match item_id {
                None => item_id = Some(po_line.item_id),
                Some(id) if id != po_line.item_id => {
                    return Err(Error::Validation("item_mismatch"))
                }
                Some(_) => {}
            }
        } else if let Some(id) = item_id {
            let po_line: Option<PoLine> =
                sqlx::query_as("SELECT * FROM po_line WHERE po_id = ? AND item_id = ? LIMIT 1")
                    .bind(truck.po_id)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            if po_line.is_none() {
                return Err(Error::Validation("item_not_in_po"));
            }
        }

        match update.update_type {
            TruckUpdateType::LineProgress => {
                if update.po_line_id.is_none() {
                    return Err(Error::Validation("po_line_required"));
                }
                if update.quantity.is_none() {
                    return Err(Error::Validation("quantity_required"));
                }
            }
            TruckUpdateType::Status => {
                if update.status.is_none() {
                    return Err(Error::Validation("status_required"));
                }
            }
            TruckUpdateType::Note => {}
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let update_id = sqlx::query(
            "INSERT INTO incoming_truck_update \
             (truck_id, update_type, message, status, po_line_id, item_id, quantity, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(truck_id)
        .bind(update.update_type)
        .bind(&update.message)
        .bind(update.status)
        .bind(update.po_line_id)
        .bind(item_id)
        .bind(update.quantity)
        .bind(created_by)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        if update.update_type == TruckUpdateType::Status {
            if let Some(status) = update.status {
                let arrived_at = match (status, truck.arrived_at) {
                    (TruckStatus::Arrived, None) => Some(now),
                    (_, existing) => existing,
                };
                sqlx::query(
                    "UPDATE incoming_truck SET status = ?, arrived_at = ? WHERE truck_id = ?",
                )
                .bind(status)
                .bind(arrived_at)
                .bind(truck_id)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;

        let stored =
            sqlx::query_as::<_, TruckUpdate>("SELECT * FROM incoming_truck_update WHERE update_id = ?")
                .bind(update_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewItem, NewPoLine};

    async fn po_with_line(store: &Store) -> (i64, i64, i64) {
        let (vendor, _) = store.get_or_create_vendor("Acme Logistics").await.unwrap();
        let item = store
            .create_item(&NewItem {
                sku: "SKU-TRUCK".to_string(),
                upc: None,
                description: "Incoming Widget".to_string(),
                category: None,
                subcategory: None,
                vendor_model: None,
                unit_cost: 5.0,
                price: 10.0,
                tax_code: None,
                short_code: "TRK1".to_string(),
            })
            .await
            .unwrap();
        let po = store
            .create_po(
                vendor.vendor_id,
                &[NewPoLine {
                    item_id: item.item_id,
                    description: "Widget".to_string(),
                    qty_ordered: 10.0,
                    unit_cost: 5.0,
                }],
                None,
                "tester",
            )
            .await
            .unwrap();
        let line_id = store.po_lines(po.po_id).await.unwrap()[0].po_line_id;
        (po.po_id, line_id, item.item_id)
    }

    #[tokio::test]
    async fn create_truck_fills_line_description_from_po() {
        let store = Store::in_memory().await.unwrap();
        let (po_id, line_id, item_id) = po_with_line(&store).await;

        let truck = store
            .create_truck(
                po_id,
                "TRUCK-100",
                Some("Acme Freight"),
                TruckStatus::Scheduled,
                None,
                &[NewTruckLine {
                    po_line_id: line_id,
                    item_id,
                    qty_expected: Some(10.0),
                    description: None,
                }],
            )
            .await
            .unwrap();

        let lines = store.truck_lines(truck.truck_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description.as_deref(), Some("Widget"));
        assert_eq!(lines[0].qty_expected, Some(10.0));
    }

    #[tokio::test]
    async fn create_truck_requires_po_and_matching_lines() {
        let store = Store::in_memory().await.unwrap();
        let (po_id, line_id, item_id) = po_with_line(&store).await;

        let missing_po = store
            .create_truck(po_id + 99, "T", None, TruckStatus::Scheduled, None, &[])
            .await
            .unwrap_err();
        assert!(matches!(missing_po, Error::NotFound("po_not_found")));

        let wrong_item = store
            .create_truck(
                po_id,
                "T",
                None,
                TruckStatus::Scheduled,
                None,
                &[NewTruckLine {
                    po_line_id: line_id,
                    item_id: item_id + 1,
                    qty_expected: None,
                    description: None,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(wrong_item, Error::Validation("item_mismatch")));
    }

    #[tokio::test]
    async fn update_validations_follow_po_linkage() {
        let store = Store::in_memory().await.unwrap();
        let (po_id, line_id, item_id) = po_with_line(&store).await;
        let other_item = store
            .create_item(&NewItem {
                sku: "SKU-OTHER".to_string(),
                upc: None,
                description: "Other".to_string(),
                category: None,
                subcategory: None,
                vendor_model: None,
                unit_cost: 3.0,
                price: 6.0,
                tax_code: None,
                short_code: "OTR1".to_string(),
            })
            .await
            .unwrap();
        let truck = store
            .create_truck(po_id, "TRUCK-200", None, TruckStatus::Scheduled, None, &[])
            .await
            .unwrap();

        let mismatch = store
            .add_truck_update(
                truck.truck_id,
                &NewTruckUpdate {
                    update_type: TruckUpdateType::LineProgress,
                    message: None,
                    status: None,
                    po_line_id: Some(line_id),
                    item_id: Some(other_item.item_id),
                    quantity: Some(2.0),
                },
                Some("tester"),
            )
            .await
            .unwrap_err();
        assert!(matches!(mismatch, Error::Validation("item_mismatch")));

        let stray_item = store
            .add_truck_update(
                truck.truck_id,
                &NewTruckUpdate {
                    update_type: TruckUpdateType::Note,
                    message: Some("hm".to_string()),
                    status: None,
                    po_line_id: None,
                    item_id: Some(other_item.item_id),
                    quantity: None,
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(stray_item, Error::Validation("item_not_in_po")));

        let stored = store
            .add_truck_update(
                truck.truck_id,
                &NewTruckUpdate {
                    update_type: TruckUpdateType::LineProgress,
                    message: None,
                    status: None,
                    po_line_id: Some(line_id),
                    item_id: None,
                    quantity: Some(2.5),
                },
                Some("tester"),
            )
            .await
            .unwrap();
        // Item id resolves from the PO line when omitted.
        assert_eq!(stored.item_id, Some(item_id));
        assert_eq!(stored.quantity, Some(2.5));
    }

    #[tokio::test]
    async fn status_update_moves_the_truck_and_stamps_arrival() {
        let store = Store::in_memory().await.unwrap();
        let (po_id, _, _) = po_with_line(&store).await;
        let truck = store
            .create_truck(po_id, "TRUCK-300", None, TruckStatus::Scheduled, None, &[])
            .await
            .unwrap();
        assert!(truck.arrived_at.is_none());

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
                None,
            )
            .await
            .unwrap();

        let truck = store.get_truck(truck.truck_id).await.unwrap().unwrap();
        assert_eq!(truck.status, TruckStatus::Arrived);
        assert!(truck.arrived_at.is_some());

        let missing_status = store
            .add_truck_update(
                truck.truck_id,
                &NewTruckUpdate {
                    update_type: TruckUpdateType::Status,
                    message: None,
                    status: None,
                    po_line_id: None,
                    item_id: None,
                    quantity: None,
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(missing_status, Error::Validation("status_required")));
    }
}
