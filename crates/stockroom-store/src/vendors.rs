//! Vendor queries

use chrono::Utc;
use stockroom_domain::{Vendor, VendorAddress};
use stockroom_types::Result;

use crate::{like_pattern, Store};

impl Store {
    pub async fn create_vendor(
        &self,
        name: &str,
        terms: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&VendorAddress>,
    ) -> Result<Vendor> {
        let now = Utc::now();
        let address_json = match address {
            Some(address) => Some(serde_json::to_string(address)?),
            None => None,
        };
        let result = sqlx::query(
            "INSERT INTO vendor (name, terms, phone, email, address_json, active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(name)
        .bind(terms)
        .bind(phone)
        .bind(email)
        .bind(address_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.get_vendor(result.last_insert_rowid()).await
    }

    pub async fn get_vendor(&self, vendor_id: i64) -> Result<Vendor> {
        let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendor WHERE vendor_id = ?")
            .bind(vendor_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(vendor)
    }

    pub async fn find_vendor_by_name(&self, name: &str) -> Result<Option<Vendor>> {
        let vendor =
            sqlx::query_as::<_, Vendor>("SELECT * FROM vendor WHERE lower(name) = lower(?)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(vendor)
    }

    /// Returns the vendor plus whether it had to be created.
    pub async fn get_or_create_vendor(&self, name: &str) -> Result<(Vendor, bool)> {
        if let Some(vendor) = self.find_vendor_by_name(name).await? {
            return Ok((vendor, false));
        }
        let vendor = self.create_vendor(name, None, None, None, None).await?;
        Ok((vendor, true))
    }

    /// Vendors ordered by name, optionally filtered on name/email/phone.
    pub async fn list_vendors(&self, q: Option<&str>) -> Result<Vec<Vendor>> {
        let vendors = match like_pattern(q) {
            Some(pattern) => {
                sqlx::query_as::<_, Vendor>(
                    "SELECT * FROM vendor \
                     WHERE lower(name) LIKE ? OR lower(coalesce(email, '')) LIKE ? \
                        OR lower(coalesce(phone, '')) LIKE ? \
                     ORDER BY name ASC",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vendor>("SELECT * FROM vendor ORDER BY name ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(vendors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_case_insensitive() {
        let store = Store::in_memory().await.unwrap();
        let (first, created) = store.get_or_create_vendor("Acme Logistics").await.unwrap();
        assert!(created);
        let (second, created) = store.get_or_create_vendor("ACME LOGISTICS").await.unwrap();
        assert!(!created);
        assert_eq!(first.vendor_id, second.vendor_id);
    }

    #[tokio::test]
    async fn list_filters_on_name_email_phone() {
        let store = Store::in_memory().await.unwrap();
        let address = VendorAddress {
            city: Some("Tulsa".to_string()),
            state: Some("OK".to_string()),
            ..Default::default()
        };
        store
            .create_vendor("Widget Co", Some("Net 30"), None, Some("sales@widget.example"), Some(&address))
            .await
            .unwrap();
        store
            .create_vendor("Gadget Supply", None, Some("555-0100"), None, None)
            .await
            .unwrap();

        let hits = store.list_vendors(Some("widget")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Widget Co");
        assert_eq!(hits[0].address().unwrap().city.as_deref(), Some("Tulsa"));

        let all = store.list_vendors(Some("  ")).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Gadget Supply");
    }
}
