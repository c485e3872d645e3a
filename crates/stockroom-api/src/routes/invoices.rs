//! Invoice endpoints

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use stockroom_store::InvoiceSummary;

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<InvoiceSummary>>, ApiError> {
    Ok(Json(state.store.list_invoices(params.q.as_deref()).await?))
}
