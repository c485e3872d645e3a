//! Item and kiosk catalog endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_domain::service::short_code_for_sku;
use stockroom_domain::Item;
use stockroom_store::{CatalogEntry, ItemLocation, NewItem};
use stockroom_types::{BarcodeKind, Error, PoStatus};

use crate::{ApiError, AppState, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/catalog", get(catalog))
        .route("/search", get(search))
        .route("/by-short-code/:code", get(by_short_code))
        .route("/scan/:barcode", get(scan))
        .route("/:item_id", get(detail))
}

#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub item_id: i64,
    pub sku: String,
    pub description: String,
    pub price: f64,
    pub short_code: String,
}

impl From<Item> for ItemSummary {
    fn from(item: Item) -> Self {
        Self {
            item_id: item.item_id,
            sku: item.sku,
            description: item.description,
            price: item.price,
            short_code: item.short_code,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemCreateRequest {
    pub sku: String,
    pub description: String,
    pub upc: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub vendor_model: Option<String>,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub price: f64,
    pub tax_code: Option<String>,
    pub barcode: Option<String>,
}

/// Stage a new catalog item from the kiosk.
async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ItemCreateRequest>,
) -> Result<Json<ItemSummary>, ApiError> {
    user.require_any(&["Floor", "Admin"])?;
    let sku = payload.sku.trim().to_string();
    if sku.is_empty() || payload.description.trim().is_empty() {
        return Err(Error::Validation("missing_sku_or_description").into());
    }
    if state.store.find_item_by_sku(&sku).await?.is_some() {
        return Err(Error::Validation("sku_exists").into());
    }

    let in_use = state.store.short_codes_in_use().await?;
    let short_code = short_code_for_sku(&sku, &in_use);
    let item = state
        .store
        .create_item(&NewItem {
            sku,
            upc: payload.upc,
            description: payload.description.trim().to_string(),
            category: payload.category,
            subcategory: payload.subcategory,
            vendor_model: payload.vendor_model,
            unit_cost: payload.unit_cost,
            price: payload.price,
            tax_code: payload.tax_code,
            short_code,
        })
        .await?;
    if let Some(barcode) = payload.barcode {
        state
            .store
            .add_barcode(item.item_id, &barcode, BarcodeKind::Item)
            .await?;
    }
    Ok(Json(item.into()))
}

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let entries = state
        .store
        .catalog(params.q.as_deref(), params.limit.unwrap_or(50))
        .await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ItemSummary>>, ApiError> {
    let items = state.store.search_items(&params.q).await?;
    Ok(Json(items.into_iter().map(ItemSummary::from).collect()))
}

async fn by_short_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ItemSummary>, ApiError> {
    let item = state
        .store
        .find_item_by_short_code(&code)
        .await?
        .ok_or(Error::NotFound("not_found"))?;
    Ok(Json(item.into()))
}

#[derive(Debug, Serialize)]
pub struct ScanLocation {
    pub location: String,
    pub qty_on_hand: f64,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub item: ItemSummary,
    pub locations: Vec<ScanLocation>,
    pub last_cost: f64,
}

async fn scan(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<ScanResponse>, ApiError> {
    let item = state
        .store
        .find_item_by_barcode(&barcode)
        .await?
        .ok_or(Error::NotFound("barcode_not_found"))?;
    let locations = state
        .store
        .item_locations(item.item_id)
        .await?
        .into_iter()
        .map(|row| ScanLocation {
            location: row.location_name,
            qty_on_hand: row.qty_on_hand,
        })
        .collect();
    let last_cost = item.unit_cost;
    Ok(Json(ScanResponse {
        item: item.into(),
        locations,
        last_cost,
    }))
}

#[derive(Debug, Serialize)]
pub struct IncomingPurchaseInfo {
    pub po_id: i64,
    pub status: PoStatus,
    pub expected_date: Option<DateTime<Utc>>,
    pub vendor_name: Option<String>,
    pub qty_ordered: f64,
    pub qty_received: f64,
    pub qty_remaining: f64,
}

#[derive(Debug, Serialize)]
pub struct ItemDetailResponse {
    pub item: ItemSummary,
    pub total_on_hand: f64,
    pub locations: Vec<ItemLocation>,
    pub incoming: Vec<IncomingPurchaseInfo>,
}

async fn detail(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Json<ItemDetailResponse>, ApiError> {
    let item = state
        .store
        .get_item(item_id)
        .await?
        .ok_or(Error::NotFound("not_found"))?;

    let locations = state.store.item_locations(item_id).await?;
    let total_on_hand = locations.iter().map(|row| row.qty_on_hand).sum();

    let incoming = state
        .store
        .incoming_for_item(item_id)
        .await?
        .into_iter()
        .map(|row| IncomingPurchaseInfo {
            po_id: row.po_id,
            status: row.status,
            expected_date: row.expected_date,
            vendor_name: row.vendor_name,
            qty_ordered: row.qty_ordered,
            qty_received: row.qty_received,
            qty_remaining: (row.qty_ordered - row.qty_received).max(0.0),
        })
        .collect();

    Ok(Json(ItemDetailResponse {
        item: item.into(),
        total_on_hand,
        locations,
        incoming,
    }))
}
