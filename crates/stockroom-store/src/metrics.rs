//! Count and recency queries feeding the dashboard and health endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockroom_domain::{PurchaseOrder, Receiving, Sale};
use stockroom_types::{Result, SaleStatus};

use crate::Store;

/// Row counts reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetCounts {
    pub vendors: i64,
    pub locations: i64,
    pub items: i64,
    pub customers: i64,
}

/// One associate's recent receiving activity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReceiverActivity {
    pub received_by: String,
    pub receipts: i64,
    pub last_received_at: DateTime<Utc>,
}

impl Store {
    pub async fn count_sales(
        &self,
        status: SaleStatus,
        source: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        let mut sql = "SELECT COUNT(*) FROM sale WHERE status = ?".to_string();
        if source.is_some() {
            sql.push_str(" AND source = ?");
        }
        if since.is_some() {
            sql.push_str(" AND created_at >= ?");
        }
        let mut query = sqlx::query_as::<_, (i64,)>(&sql).bind(status);
        if let Some(source) = source {
            query = query.bind(source);
        }
        if let Some(since) = since {
            query = query.bind(since);
        }
        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// POs still expecting goods.
    pub async fn count_inbound_pos(&self) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM po WHERE status IN ('open', 'partial')")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn count_receivings_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM receiving WHERE received_at >= ?")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn count_active_receivers(&self, since: DateTime<Utc>) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT received_by) FROM receiving WHERE received_at >= ?",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn recent_sales(&self, limit: i64) -> Result<Vec<Sale>> {
        let sales =
            sqlx::query_as::<_, Sale>("SELECT * FROM sale ORDER BY created_at DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(sales)
    }

    pub async fn recent_receivings(&self, limit: i64) -> Result<Vec<Receiving>> {
        let receivings = sqlx::query_as::<_, Receiving>(
            "SELECT * FROM receiving ORDER BY received_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(receivings)
    }

    pub async fn recent_pos(&self, limit: i64) -> Result<Vec<PurchaseOrder>> {
        let pos = sqlx::query_as::<_, PurchaseOrder>(
            "SELECT * FROM po ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(pos)
    }

    pub async fn receivers_since(&self, since: DateTime<Utc>) -> Result<Vec<ReceiverActivity>> {
        let receivers = sqlx::query_as::<_, ReceiverActivity>(
            "SELECT received_by, COUNT(*) AS receipts, MAX(received_at) AS last_received_at \
             FROM receiving WHERE received_at >= ? \
             GROUP BY received_by ORDER BY last_received_at DESC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(receivers)
    }

    pub async fn dataset_counts(&self) -> Result<DatasetCounts> {
        let (vendors,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vendor")
            .fetch_one(&self.pool)
            .await?;
        let (locations,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM location")
            .fetch_one(&self.pool)
            .await?;
        let (items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM item")
            .fetch_one(&self.pool)
            .await?;
        let (customers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer")
            .fetch_one(&self.pool)
            .await?;
        Ok(DatasetCounts {
            vendors,
            locations,
            items,
            customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn sale_counts_respect_source_and_window() {
        let store = Store::in_memory().await.unwrap();
        store
            .create_sale(None, None, Some("ocr_ticket"))
            .await
            .unwrap();
        store.create_sale(None, None, Some("manual")).await.unwrap();

        assert_eq!(
            store.count_sales(SaleStatus::Draft, None, None).await.unwrap(),
            2
        );
        assert_eq!(
            store
                .count_sales(SaleStatus::Draft, Some("ocr_ticket"), None)
                .await
                .unwrap(),
            1
        );
        let future = Utc::now() + Duration::hours(1);
        assert_eq!(
            store
                .count_sales(SaleStatus::Draft, None, Some(future))
                .await
                .unwrap(),
            0
        );
    }
}
