//! Purchase order endpoints

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_app::events::PoReceived;
use stockroom_store::{NewPoLine, PoLineSearchResult, PoPatch, PoSummary, ReceiveLine};
use stockroom_types::PoStatus;

use crate::{ApiError, AppState, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/lines/search", get(search_lines))
        .route("/:po_id", get(detail).patch(update))
        .route("/:po_id/receive", post(receive))
}

#[derive(Debug, Deserialize)]
pub struct PoLinePayload {
    pub item_id: i64,
    pub description: String,
    pub qty_ordered: f64,
    pub unit_cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct PoCreatePayload {
    pub vendor_id: i64,
    pub lines: Vec<PoLinePayload>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PoCreateResponse {
    pub po_id: i64,
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<PoCreatePayload>,
) -> Result<Json<PoCreateResponse>, ApiError> {
    user.require_any(&["Purchasing", "Admin"])?;
    let lines: Vec<NewPoLine> = payload
        .lines
        .into_iter()
        .map(|line| NewPoLine {
            item_id: line.item_id,
            description: line.description,
            qty_ordered: line.qty_ordered,
            unit_cost: line.unit_cost,
        })
        .collect();
    let po = state
        .store
        .create_po(payload.vendor_id, &lines, payload.notes.as_deref(), &user.id)
        .await?;
    Ok(Json(PoCreateResponse { po_id: po.po_id }))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<PoSummary>>, ApiError> {
    Ok(Json(state.store.list_po_summaries().await?))
}

#[derive(Debug, Serialize)]
pub struct PoLineInfo {
    pub po_line_id: i64,
    pub item_id: i64,
    pub description: String,
    pub qty_ordered: f64,
    pub qty_received: f64,
    pub unit_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct PoDetailResponse {
    pub po_id: i64,
    pub po_number: String,
    pub status: PoStatus,
    pub lines: Vec<PoLineInfo>,
}

async fn detail(
    State(state): State<AppState>,
    Path(po_id): Path<i64>,
) -> Result<Json<PoDetailResponse>, ApiError> {
    let po = state
        .store
        .get_po(po_id)
        .await?
        .ok_or(stockroom_types::Error::NotFound("not_found"))?;
    let lines = state
        .store
        .po_lines(po_id)
        .await?
        .into_iter()
        .map(|line| PoLineInfo {
            po_line_id: line.po_line_id,
            item_id: line.item_id,
            description: line.description,
            qty_ordered: line.qty_ordered,
            qty_received: line.qty_received,
            unit_cost: line.unit_cost,
        })
        .collect();
    Ok(Json(PoDetailResponse {
        po_number: po.po_number(),
        po_id: po.po_id,
        status: po.status,
        lines,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PoPatchRequest {
    pub status: Option<PoStatus>,
    pub expected_date: Option<DateTime<Utc>>,
    pub terms: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PoPatchResponse {
    pub po_id: i64,
    pub status: PoStatus,
}

async fn update(
    State(state): State<AppState>,
    Path(po_id): Path<i64>,
    Json(payload): Json<PoPatchRequest>,
) -> Result<Json<PoPatchResponse>, ApiError> {
    let po = state
        .store
        .patch_po(
            po_id,
            PoPatch {
                status: payload.status,
                expected_date: payload.expected_date,
                terms: payload.terms,
                notes: payload.notes,
            },
        )
        .await?;
    Ok(Json(PoPatchResponse {
        po_id: po.po_id,
        status: po.status,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReceiveLinePayload {
    pub po_line_id: i64,
    pub qty_received: f64,
    pub unit_cost: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ReceiveResponse {
    pub receipt_id: i64,
    pub bill_id: i64,
}

async fn receive(
    State(state): State<AppState>,
    Path(po_id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<Vec<ReceiveLinePayload>>,
) -> Result<Json<ReceiveResponse>, ApiError> {
    user.require_any(&["Purchasing", "Admin"])?;
    let lines: Vec<ReceiveLine> = payload
        .into_iter()
        .map(|line| ReceiveLine {
            po_line_id: line.po_line_id,
            qty_received: line.qty_received,
            unit_cost: line.unit_cost,
        })
        .collect();
    let outcome = state.store.receive_po(po_id, &lines, &user.id).await?;
    state.events.po_received(PoReceived {
        po_id,
        receipt_id: outcome.receipt_id,
        bill_id: outcome.bill_id,
    });
    Ok(Json(ReceiveResponse {
        receipt_id: outcome.receipt_id,
        bill_id: outcome.bill_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LineSearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

async fn search_lines(
    State(state): State<AppState>,
    Query(params): Query<LineSearchParams>,
) -> Result<Json<Vec<PoLineSearchResult>>, ApiError> {
    let results = state
        .store
        .search_po_lines(&params.q, params.limit.unwrap_or(25))
        .await?;
    Ok(Json(results))
}
