//! Label endpoints

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stockroom_domain::service::{prepare_label_context, render_label};
use stockroom_types::{Error, LabelTarget};

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(templates))
        .route("/render", post(render))
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub template_id: i64,
    pub name: String,
    pub target: LabelTarget,
}

async fn templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateSummary>>, ApiError> {
    let templates = state
        .store
        .list_label_templates()
        .await?
        .into_iter()
        .map(|template| TemplateSummary {
            template_id: template.template_id,
            name: template.name,
            target: template.target,
        })
        .collect();
    Ok(Json(templates))
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub template_id: i64,
    #[serde(default)]
    pub context: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub template_id: i64,
    /// Label XML ready for client-side printing.
    pub xml: String,
}

async fn render(
    State(state): State<AppState>,
    Json(payload): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let template = state
        .store
        .get_label_template(payload.template_id)
        .await?
        .ok_or(Error::NotFound("template_not_found"))?;
    let context = prepare_label_context(payload.context);
    Ok(Json(RenderResponse {
        template_id: template.template_id,
        xml: render_label(&template.label_xml, &context),
    }))
}
