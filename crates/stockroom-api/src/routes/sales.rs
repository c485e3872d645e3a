//! Sales ticket endpoints

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_app::events::{DeliveryCompleted, TicketFinalized};
use stockroom_domain::Sale;
use stockroom_types::{DeliveryStatus, Error, LocationKind, SaleStatus};

use crate::{ApiError, AppState, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/dashboard", get(dashboard))
        .route("/:sale_id/add-line", post(add_line))
        .route("/:sale_id/finalize", post(finalize))
        .route("/:sale_id/void", post(void))
        .route("/:sale_id/approve", post(approve))
        .route("/:sale_id/reject", post(reject))
        .route("/:sale_id/delivery-request", post(delivery_request))
        .route(
            "/:sale_id/delivery-status",
            get(delivery_status).patch(update_delivery_status),
        )
}

#[derive(Debug, Serialize)]
pub struct DraftTicket {
    pub sale_id: i64,
    pub ocr_confidence: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct DraftListResponse {
    pub drafts: Vec<DraftTicket>,
}

async fn list(State(state): State<AppState>) -> Result<Json<DraftListResponse>, ApiError> {
    let drafts = state
        .store
        .list_sales_by_status(SaleStatus::Draft, 50)
        .await?
        .into_iter()
        .map(|sale| DraftTicket {
            sale_id: sale.sale_id,
            ocr_confidence: sale.ocr_confidence.unwrap_or(0.0),
            total: sale.total,
        })
        .collect();
    Ok(Json(DraftListResponse { drafts }))
}

#[derive(Debug, Serialize)]
pub struct SaleSummary {
    pub sale_id: i64,
    pub status: SaleStatus,
    pub total: f64,
    pub sale_date: DateTime<Utc>,
    pub delivery_requested: bool,
    pub delivery_status: Option<DeliveryStatus>,
}

impl From<Sale> for SaleSummary {
    fn from(sale: Sale) -> Self {
        Self {
            sale_id: sale.sale_id,
            status: sale.status,
            total: sale.total,
            sale_date: sale.sale_date,
            delivery_requested: sale.delivery_requested,
            delivery_status: sale.delivery_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SalesDashboardResponse {
    pub open_sales: Vec<SaleSummary>,
    pub fulfilled_sales: Vec<SaleSummary>,
}

async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<SalesDashboardResponse>, ApiError> {
    let open_sales = state
        .store
        .list_sales_by_status(SaleStatus::Open, 50)
        .await?
        .into_iter()
        .map(SaleSummary::from)
        .collect();
    let fulfilled_sales = state
        .store
        .list_sales_by_status(SaleStatus::Fulfilled, 50)
        .await?
        .into_iter()
        .map(SaleSummary::from)
        .collect();
    Ok(Json(SalesDashboardResponse {
        open_sales,
        fulfilled_sales,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SaleCreateRequest {
    pub customer_id: Option<i64>,
    pub created_by: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaleCreateResponse {
    pub sale_id: i64,
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<SaleCreateRequest>,
) -> Result<Json<SaleCreateResponse>, ApiError> {
    user.require_any(&["Floor", "Admin"])?;
    let created_by = payload.created_by.unwrap_or_else(|| user.id.clone());
    let source = payload.source.unwrap_or_else(|| "manual".to_string());
    let sale = state
        .store
        .create_sale(payload.customer_id, Some(&created_by), Some(&source))
        .await?;
    Ok(Json(SaleCreateResponse {
        sale_id: sale.sale_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SaleLineRequest {
    pub sku: Option<String>,
    pub short_code: Option<String>,
    pub barcode: Option<String>,
    #[serde(default = "default_qty")]
    pub qty: f64,
    pub location_id: Option<i64>,
}

fn default_qty() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
pub struct SaleLineResponse {
    pub sale_line_id: i64,
}

async fn add_line(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    Json(payload): Json<SaleLineRequest>,
) -> Result<Json<SaleLineResponse>, ApiError> {
    let item = if let Some(sku) = &payload.sku {
        state.store.find_item_by_sku(sku).await?
    } else if let Some(short_code) = &payload.short_code {
        state.store.find_item_by_short_code(short_code).await?
    } else if let Some(barcode) = &payload.barcode {
        state.store.find_item_by_barcode(barcode).await?
    } else {
        return Err(Error::Validation("missing_identifier").into());
    };
    let item = item.ok_or(Error::NotFound("item_not_found"))?;

    let location_id = match payload.location_id {
        Some(location_id) => location_id,
        None => {
            let (location, _) = state
                .store
                .get_or_create_location("Sales Floor", LocationKind::Floor)
                .await?;
            location.location_id
        }
    };
    let line = state
        .store
        .add_sale_line(sale_id, &item, location_id, payload.qty, None)
        .await?;
    Ok(Json(SaleLineResponse {
        sale_line_id: line.sale_line_id,
    }))
}

#[derive(Debug, Serialize)]
pub struct SaleFinalizeResponse {
    pub sale_id: i64,
    pub status: SaleStatus,
    pub total: f64,
}

async fn finalize(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> Result<Json<SaleFinalizeResponse>, ApiError> {
    let (sale, lines) = state.store.finalize_sale(sale_id).await?;
    state
        .events
        .ticket_finalized(TicketFinalized::from_sale(&sale, &lines));
    Ok(Json(SaleFinalizeResponse {
        sale_id: sale.sale_id,
        status: sale.status,
        total: sale.total,
    }))
}

#[derive(Debug, Serialize)]
pub struct SaleStatusResponse {
    pub sale_id: i64,
    pub status: SaleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_required: Option<bool>,
}

async fn void(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> Result<Json<SaleStatusResponse>, ApiError> {
    let sale = state
        .store
        .set_sale_status(sale_id, SaleStatus::Void)
        .await?;
    Ok(Json(SaleStatusResponse {
        sale_id: sale.sale_id,
        status: sale.status,
        review_required: None,
    }))
}

async fn approve(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    user: CurrentUser,
) -> Result<Json<SaleStatusResponse>, ApiError> {
    user.require_any(&["Admin", "AP"])?;
    let sale = state
        .store
        .set_sale_status(sale_id, SaleStatus::Open)
        .await?;
    Ok(Json(SaleStatusResponse {
        sale_id: sale.sale_id,
        status: sale.status,
        review_required: None,
    }))
}

async fn reject(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    user: CurrentUser,
) -> Result<Json<SaleStatusResponse>, ApiError> {
    user.require_any(&["Admin", "AP"])?;
    let sale = state.store.reject_sale(sale_id).await?;
    Ok(Json(SaleStatusResponse {
        sale_id: sale.sale_id,
        status: sale.status,
        review_required: Some(true),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeliveryRequest {
    pub delivery_requested: bool,
}

#[derive(Debug, Serialize)]
pub struct DeliveryStatusResponse {
    pub sale_id: i64,
    pub delivery_requested: bool,
    pub delivery_status: Option<DeliveryStatus>,
}

async fn delivery_request(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    Json(payload): Json<DeliveryRequest>,
) -> Result<Json<DeliveryStatusResponse>, ApiError> {
    let sale = state
        .store
        .set_delivery_request(sale_id, payload.delivery_requested)
        .await?;
    Ok(Json(DeliveryStatusResponse {
        sale_id: sale.sale_id,
        delivery_requested: sale.delivery_requested,
        delivery_status: sale.delivery_status,
    }))
}

async fn delivery_status(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    user: CurrentUser,
) -> Result<Json<DeliveryStatusResponse>, ApiError> {
    user.require_any(&["Driver", "Admin"])?;
    let sale = state
        .store
        .get_sale(sale_id)
        .await?
        .ok_or(Error::NotFound("sale_not_found"))?;
    Ok(Json(DeliveryStatusResponse {
        sale_id: sale.sale_id,
        delivery_requested: sale.delivery_requested,
        delivery_status: sale.delivery_status,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeliveryStatusUpdate {
    pub delivery_status: DeliveryStatus,
}

async fn update_delivery_status(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<DeliveryStatusUpdate>,
) -> Result<Json<DeliveryStatusResponse>, ApiError> {
    user.require_any(&["Driver", "Admin"])?;
    let sale = state
        .store
        .set_delivery_status(sale_id, payload.delivery_status)
        .await?;
    if sale.delivery_status == Some(DeliveryStatus::Delivered) {
        state.events.delivery_completed(DeliveryCompleted {
            sale_id: sale.sale_id,
        });
    }
    Ok(Json(DeliveryStatusResponse {
        sale_id: sale.sale_id,
        delivery_requested: sale.delivery_requested,
        delivery_status: sale.delivery_status,
    }))
}
