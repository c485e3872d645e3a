//! Label template queries

use chrono::Utc;
use stockroom_domain::LabelTemplate;
use stockroom_types::{Error, LabelTarget, Result};

use crate::Store;

impl Store {
    pub async fn create_label_template(
        &self,
        name: &str,
        target: LabelTarget,
        label_xml: &str,
    ) -> Result<LabelTemplate> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO label_template (name, target, label_xml, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(target)
        .bind(label_xml)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_label_template(result.last_insert_rowid())
            .await?
            .ok_or(Error::NotFound("template_not_found"))
    }

    pub async fn get_label_template(&self, template_id: i64) -> Result<Option<LabelTemplate>> {
        let template = sqlx::query_as::<_, LabelTemplate>(
            "SELECT * FROM label_template WHERE template_id = ?",
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(template)
    }

    pub async fn list_label_templates(&self) -> Result<Vec<LabelTemplate>> {
        let templates =
            sqlx::query_as::<_, LabelTemplate>("SELECT * FROM label_template ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(templates)
    }
}
