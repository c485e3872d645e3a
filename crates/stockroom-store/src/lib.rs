//! SQLite persistence for stockroom.
//!
//! [`Store`] wraps a connection pool and applies the schema idempotently
//! on open, so a fresh database file (or an in-memory database in tests)
//! is usable immediately. Entity access is grouped into one module per
//! aggregate; multi-step writes run inside transactions.

mod bills;
mod customers;
mod inventory;
mod items;
mod labels;
mod locations;
mod metrics;
mod po;
mod sales;
mod trucks;
mod vendors;

pub use bills::InvoiceSummary;
pub use items::{CatalogEntry, CatalogLocation, IncomingPoLine, ItemLocation, NewItem};
pub use metrics::{DatasetCounts, ReceiverActivity};
pub use po::{NewPoLine, PoLineSearchResult, PoPatch, PoSummary, ReceiveLine, ReceiveOutcome};
pub use trucks::{NewTruckLine, NewTruckUpdate};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use stockroom_types::Result;

const SCHEMA: &str = include_str!("schema.sql");

/// Handle to the stockroom database.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `url`,
    /// e.g. `sqlite://stockroom.db`.
    pub async fn open(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.apply_schema().await?;
        tracing::debug!(url, "database ready");
        Ok(store)
    }

    /// Fresh private in-memory database. A single connection keeps every
    /// caller on the same database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn apply_schema(&self) -> Result<()> {
        for statement in SCHEMA.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// `SELECT 1` liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}


/// `?, ?, ...` fragment for building `IN` clauses.
pub(crate) fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Normalize a user-supplied search term into a lowercase LIKE pattern.
/// Empty and whitespace-only input means "no filter".
pub(crate) fn like_pattern(q: Option<&str>) -> Option<String> {
    let term = q.unwrap_or("").trim().to_lowercase();
    if term.is_empty() {
        None
    } else {
        Some(format!("%{}%", term))
    }
}
