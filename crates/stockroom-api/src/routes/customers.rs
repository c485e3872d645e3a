//! Customer endpoints

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub customer_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerSummary>>, ApiError> {
    let customers = state
        .store
        .search_customers(params.q.as_deref(), params.limit.unwrap_or(25))
        .await?;
    Ok(Json(
        customers
            .into_iter()
            .map(|customer| CustomerSummary {
                customer_id: customer.customer_id,
                name: customer.name,
                phone: customer.phone,
                email: customer.email,
            })
            .collect(),
    ))
}
