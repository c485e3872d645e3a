use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom_types::LabelTarget;

/// Printable label layout with `{PLACEHOLDER}` substitution slots.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabelTemplate {
    pub template_id: i64,
    pub name: String,
    pub target: LabelTarget,
    pub label_xml: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
