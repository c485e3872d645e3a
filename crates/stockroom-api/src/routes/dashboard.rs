//! Dashboard endpoint

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use stockroom_app::dashboard::{build_summary, DashboardSummary};

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(summary))
}

async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(build_summary(&state.store).await?))
}
