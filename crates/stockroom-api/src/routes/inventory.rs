//! Inventory endpoints

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use stockroom_types::InventoryReason;

use crate::{ApiError, AppState, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/adjust", post(adjust))
        .route("/transfer", post(transfer))
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub item_id: i64,
    pub location_id: i64,
    pub qty_delta: f64,
    pub reason: InventoryReason,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    pub inventory_id: i64,
    pub new_qty: f64,
}

async fn adjust(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let (inventory_id, new_qty) = state
        .store
        .adjust_inventory(
            payload.item_id,
            payload.location_id,
            payload.qty_delta,
            payload.reason,
            Some(&user.id),
        )
        .await?;
    Ok(Json(AdjustResponse {
        inventory_id,
        new_qty,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub item_id: i64,
    pub from_location_id: i64,
    pub to_location_id: i64,
    pub qty: f64,
}

async fn transfer(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let (inventory_id, new_qty) = state
        .store
        .transfer_inventory(
            payload.item_id,
            payload.from_location_id,
            payload.to_location_id,
            payload.qty,
            Some(&user.id),
        )
        .await?;
    Ok(Json(AdjustResponse {
        inventory_id,
        new_qty,
    }))
}
