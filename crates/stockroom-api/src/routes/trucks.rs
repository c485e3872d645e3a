//! Incoming truck endpoints
//!
//! The receiving workspace lists every truck with its expected lines and
//! a digest of its update stream, and appends status/note/progress
//! updates as dock work happens.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_domain::service::{summarize_updates, LineProgress};
use stockroom_domain::{IncomingTruck, TruckLine, TruckUpdate};
use stockroom_store::{NewTruckLine, NewTruckUpdate};
use stockroom_types::{TruckStatus, TruckUpdateType};

use crate::{ApiError, AppState, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:truck_id/updates", post(create_update))
}

#[derive(Debug, Serialize)]
pub struct AggregatedUpdates {
    pub latest_status: Option<TruckStatus>,
    pub note_count: usize,
    pub line_progress: Vec<LineProgress>,
    pub history: Vec<TruckUpdate>,
}

#[derive(Debug, Serialize)]
pub struct TruckResponse {
    pub truck_id: i64,
    pub po_id: i64,
    pub reference: String,
    pub carrier: Option<String>,
    pub status: TruckStatus,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<TruckLine>,
    pub updates: AggregatedUpdates,
}

fn truck_response(
    truck: IncomingTruck,
    lines: Vec<TruckLine>,
    updates: Vec<TruckUpdate>,
) -> TruckResponse {
    let activity = summarize_updates(&updates);
    TruckResponse {
        truck_id: truck.truck_id,
        po_id: truck.po_id,
        reference: truck.reference,
        carrier: truck.carrier,
        status: truck.status,
        scheduled_arrival: truck.scheduled_arrival,
        arrived_at: truck.arrived_at,
        created_at: truck.created_at,
        lines,
        updates: AggregatedUpdates {
            latest_status: activity.latest_status,
            note_count: activity.note_count,
            line_progress: activity.line_progress,
            history: updates,
        },
    }
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<TruckResponse>>, ApiError> {
    let trucks = state.store.list_trucks().await?;
    let truck_ids: Vec<i64> = trucks.iter().map(|truck| truck.truck_id).collect();
    let mut lines = state.store.truck_lines_for(&truck_ids).await?;
    let mut updates = state.store.truck_updates_for(&truck_ids).await?;

    Ok(Json(
        trucks
            .into_iter()
            .map(|truck| {
                let truck_lines = lines.remove(&truck.truck_id).unwrap_or_default();
                let truck_updates = updates.remove(&truck.truck_id).unwrap_or_default();
                truck_response(truck, truck_lines, truck_updates)
            })
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct TruckLineCreate {
    pub po_line_id: i64,
    pub item_id: i64,
    pub qty_expected: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TruckCreateRequest {
    pub po_id: i64,
    pub reference: String,
    pub carrier: Option<String>,
    #[serde(default = "default_truck_status")]
    pub status: TruckStatus,
    pub scheduled_arrival: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lines: Vec<TruckLineCreate>,
}

fn default_truck_status() -> TruckStatus {
    TruckStatus::Scheduled
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<TruckCreateRequest>,
) -> Result<Json<TruckResponse>, ApiError> {
    user.require_any(&["Purchasing", "Admin", "Driver"])?;
    let lines: Vec<NewTruckLine> = payload
        .lines
        .into_iter()
        .map(|line| NewTruckLine {
            po_line_id: line.po_line_id,
            item_id: line.item_id,
            qty_expected: line.qty_expected,
            description: line.description,
        })
        .collect();
    let truck = state
        .store
        .create_truck(
            payload.po_id,
            &payload.reference,
            payload.carrier.as_deref(),
            payload.status,
            payload.scheduled_arrival,
            &lines,
        )
        .await?;
    let lines = state.store.truck_lines(truck.truck_id).await?;
    Ok(Json(truck_response(truck, lines, Vec::new())))
}

#[derive(Debug, Deserialize)]
pub struct TruckUpdateRequest {
    pub update_type: TruckUpdateType,
    pub message: Option<String>,
    pub status: Option<TruckStatus>,
    pub po_line_id: Option<i64>,
    pub item_id: Option<i64>,
    pub quantity: Option<f64>,
}

async fn create_update(
    State(state): State<AppState>,
    Path(truck_id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<TruckUpdateRequest>,
) -> Result<Json<TruckUpdate>, ApiError> {
    user.require_any(&["Purchasing", "Admin", "Driver"])?;
    let update = state
        .store
        .add_truck_update(
            truck_id,
            &NewTruckUpdate {
                update_type: payload.update_type,
                message: payload.message,
                status: payload.status,
                po_line_id: payload.po_line_id,
                item_id: payload.item_id,
                quantity: payload.quantity,
            },
            Some(&user.id),
        )
        .await?;
    Ok(Json(update))
}
