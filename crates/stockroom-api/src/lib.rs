//! HTTP API for stockroom.
//!
//! One router per resource, nested here; handlers pull [`AppState`] and
//! return `Result<Json<_>, ApiError>` so every error carries a stable
//! machine-readable `detail` code.

mod auth;
mod error;
mod routes;

pub use auth::CurrentUser;
pub use error::ApiError;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use stockroom_app::{Config, EventSink};
use stockroom_store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub events: Arc<dyn EventSink>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(routes::health::health))
        .route("/config", get(routes::config::config))
        .route("/station-pin", get(routes::config::station_pin))
        .nest("/customers", routes::customers::router())
        .nest("/items", routes::items::router())
        .nest("/inventory", routes::inventory::router())
        .nest("/vendors", routes::vendors::router())
        .nest("/po", routes::po::router())
        .nest("/invoices", routes::invoices::router())
        .nest("/sales", routes::sales::router())
        .nest("/labels", routes::labels::router())
        .nest("/incoming-trucks", routes::trucks::router())
        .nest("/imports", routes::imports::router())
        .nest("/dashboard", routes::dashboard::router())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "app": "stockroom" }))
}
