//! Customer queries

use chrono::Utc;
use stockroom_domain::Customer;
use stockroom_types::{Error, Result};

use crate::{like_pattern, Store};

impl Store {
    pub async fn create_customer(
        &self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Customer> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO customer (name, phone, email, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE customer_id = ?")
                .bind(result.last_insert_rowid())
                .fetch_optional(&self.pool)
                .await?;
        customer.ok_or(Error::NotFound("customer_not_found"))
    }

    /// Find an existing customer by email, then phone, then exact name.
    pub async fn find_customer(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<Customer>> {
        if let Some(email) = email.filter(|value| !value.trim().is_empty()) {
            let hit =
                sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE lower(email) = lower(?)")
                    .bind(email)
                    .fetch_optional(&self.pool)
                    .await?;
            if hit.is_some() {
                return Ok(hit);
            }
        }
        if let Some(phone) = phone.filter(|value| !value.trim().is_empty()) {
            let hit = sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE phone = ?")
                .bind(phone)
                .fetch_optional(&self.pool)
                .await?;
            if hit.is_some() {
                return Ok(hit);
            }
        }
        if let Some(name) = name.filter(|value| !value.trim().is_empty()) {
            let hit =
                sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE lower(name) = lower(?)")
                    .bind(name)
                    .fetch_optional(&self.pool)
                    .await?;
            if hit.is_some() {
                return Ok(hit);
            }
        }
        Ok(None)
    }

    /// Substring search on name/email/phone, ordered by name.
    pub async fn search_customers(&self, q: Option<&str>, limit: i64) -> Result<Vec<Customer>> {
        let limit = limit.clamp(1, 100);
        let customers = match like_pattern(q) {
            Some(pattern) => {
                sqlx::query_as::<_, Customer>(
                    "SELECT * FROM customer \
                     WHERE lower(name) LIKE ? OR lower(coalesce(email, '')) LIKE ? \
                        OR lower(coalesce(phone, '')) LIKE ? \
                     ORDER BY name ASC LIMIT ?",
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Customer>("SELECT * FROM customer ORDER BY name ASC LIMIT ?")
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_matches_any_contact_field() {
        let store = Store::in_memory().await.unwrap();
        store
            .create_customer("Dana Field", Some("555-0101"), Some("dana@example.com"))
            .await
            .unwrap();
        store
            .create_customer("Robin Yount", None, Some("robin@example.com"))
            .await
            .unwrap();

        assert_eq!(
            store.search_customers(Some("dana"), 25).await.unwrap().len(),
            1
        );
        assert_eq!(
            store.search_customers(Some("0101"), 25).await.unwrap().len(),
            1
        );
        assert_eq!(
            store
                .search_customers(Some("example.com"), 25)
                .await
                .unwrap()
                .len(),
            2
        );
        assert_eq!(store.search_customers(None, 25).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_prefers_email_over_name() {
        let store = Store::in_memory().await.unwrap();
        let by_mail = store
            .create_customer("Same Name", None, Some("first@example.com"))
            .await
            .unwrap();
        store.create_customer("Same Name", None, None).await.unwrap();

        let found = store
            .find_customer(Some("first@example.com"), None, Some("Same Name"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.customer_id, by_mail.customer_id);
    }
}
