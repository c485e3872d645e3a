//! Spreadsheet import endpoint

use axum::extract::{Multipart, Query, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_app::importer::{import_csv, ImportCounters, NO_IMPORTABLE_ROWS_WARNING};
use stockroom_types::Error;

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/spreadsheet", post(upload))
}

#[derive(Debug, Deserialize)]
pub struct ImportParams {
    pub dataset: Option<String>,
    #[serde(rename = "replaceInventory", default)]
    pub replace_inventory: bool,
}

#[derive(Debug, Serialize)]
pub struct CountersPayload {
    pub vendors: u32,
    pub locations: u32,
    pub items: u32,
    pub barcodes: u32,
    #[serde(rename = "inventoryRecords")]
    pub inventory_records: u32,
    pub customers: u32,
    pub sales: u32,
    #[serde(rename = "purchaseOrders")]
    pub purchase_orders: u32,
    pub receivings: u32,
    pub warnings: Vec<String>,
}

impl From<ImportCounters> for CountersPayload {
    fn from(counters: ImportCounters) -> Self {
        Self {
            vendors: counters.vendors,
            locations: counters.locations,
            items: counters.items,
            barcodes: counters.barcodes,
            inventory_records: counters.inventory_records,
            customers: counters.customers,
            sales: counters.sales,
            purchase_orders: counters.purchase_orders,
            receivings: counters.receivings,
            warnings: counters.warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    #[serde(rename = "importedAt")]
    pub imported_at: DateTime<Utc>,
    #[serde(rename = "clearedInventory")]
    pub cleared_inventory: bool,
    pub counters: CountersPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

async fn upload(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .unwrap_or("upload.csv")
                .to_string();
            let data = field.bytes().await?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }
    let (filename, data) = upload.ok_or(Error::Validation("missing_file"))?;

    let report = import_csv(
        &state.store,
        &data,
        &filename,
        params.dataset.as_deref(),
        params.replace_inventory,
    )
    .await?;

    let counters = &report.counters;
    let mut message_parts: Vec<String> = Vec::new();
    if counters.vendors > 0 {
        message_parts.push(format!("Imported {} vendor(s)", counters.vendors));
    }
    if counters.items > 0 {
        message_parts.push(format!("Imported {} item(s)", counters.items));
    }
    if counters.inventory_records > 0 {
        message_parts.push(format!(
            "Updated {} inventory record(s)",
            counters.inventory_records
        ));
    }
    if counters.customers > 0 {
        message_parts.push(format!("Loaded {} customer(s)", counters.customers));
    }
    if counters.sales > 0 {
        message_parts.push(format!("Processed {} sale(s)", counters.sales));
    }
    if counters.purchase_orders > 0 {
        message_parts.push(format!(
            "Processed {} purchase order(s)",
            counters.purchase_orders
        ));
    }
    if report.cleared_inventory {
        message_parts.push("Cleared previous inventory records".to_string());
    }
    if message_parts.is_empty() {
        if counters.warnings == [NO_IMPORTABLE_ROWS_WARNING.to_string()] {
            message_parts.push(NO_IMPORTABLE_ROWS_WARNING.to_string());
        } else if !counters.warnings.is_empty() {
            message_parts.push("Processed spreadsheet with warnings".to_string());
        } else {
            message_parts.push("Processed spreadsheet".to_string());
        }
    }

    let detail = if counters.warnings.is_empty() {
        None
    } else {
        Some(counters.warnings.join("\n"))
    };

    Ok(Json(ImportResponse {
        message: message_parts.join(", "),
        imported_at: report.imported_at,
        cleared_inventory: report.cleared_inventory,
        counters: report.counters.into(),
        detail,
    }))
}
