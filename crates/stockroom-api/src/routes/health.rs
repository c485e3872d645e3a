//! Health endpoint

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub database: bool,
    pub detail: Value,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.store.ping().await.is_ok();
    let (dataset_ok, detail) = match state.store.dataset_counts().await {
        Ok(counts) => (true, json!({ "dataset": counts })),
        Err(error) => (false, json!({ "dataset_error": error.to_string() })),
    };
    Json(HealthResponse {
        ok: database && dataset_ok,
        database,
        detail,
    })
}
