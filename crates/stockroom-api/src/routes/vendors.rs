//! Vendor endpoints

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VendorSummary {
    pub vendor_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub terms: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub active: bool,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<VendorSummary>>, ApiError> {
    let vendors = state.store.list_vendors(params.q.as_deref()).await?;
    Ok(Json(
        vendors
            .into_iter()
            .map(|vendor| {
                let address = vendor.address().unwrap_or_default();
                VendorSummary {
                    vendor_id: vendor.vendor_id,
                    name: vendor.name,
                    email: vendor.email,
                    phone: vendor.phone,
                    terms: vendor.terms,
                    city: address.city,
                    state: address.state,
                    active: vendor.active,
                }
            })
            .collect(),
    ))
}
