//! Stocking location queries

use sqlx::SqliteConnection;
use stockroom_domain::Location;
use stockroom_types::{LocationKind, Result};

use crate::Store;

impl Store {
    pub async fn create_location(&self, name: &str, kind: LocationKind) -> Result<Location> {
        let result = sqlx::query("INSERT INTO location (name, kind) VALUES (?, ?)")
            .bind(name)
            .bind(kind)
            .execute(&self.pool)
            .await?;
        self.get_location(result.last_insert_rowid()).await
    }

    pub async fn get_location(&self, location_id: i64) -> Result<Location> {
        let location =
            sqlx::query_as::<_, Location>("SELECT * FROM location WHERE location_id = ?")
                .bind(location_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(location)
    }

    pub async fn find_location_by_name(&self, name: &str) -> Result<Option<Location>> {
        let location =
            sqlx::query_as::<_, Location>("SELECT * FROM location WHERE lower(name) = lower(?)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(location)
    }

    pub async fn get_or_create_location(
        &self,
        name: &str,
        kind: LocationKind,
    ) -> Result<(Location, bool)> {
        if let Some(location) = self.find_location_by_name(name).await? {
            return Ok((location, false));
        }
        Ok((self.create_location(name, kind).await?, true))
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>("SELECT * FROM location ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(locations)
    }
}

/// Resolve the location receipts post against, creating the default
/// warehouse on first use. Runs on a transaction connection so the new
/// location commits or rolls back with its receipt.
pub(crate) async fn receiving_location_id(conn: &mut SqliteConnection) -> Result<i64> {
    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT location_id FROM location ORDER BY location_id ASC LIMIT 1")
            .fetch_optional(&mut *conn)
            .await?;
    if let Some((location_id,)) = existing {
        return Ok(location_id);
    }
    let result = sqlx::query("INSERT INTO location (name, kind) VALUES (?, ?)")
        .bind("Main Warehouse")
        .bind(stockroom_types::LocationKind::Warehouse)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}
