//! Role-based auth stand-in
//!
//! The production deployment sits behind an identity proxy that injects
//! `X-User-Id` / `X-User-Roles` headers. Absent those, requests act as a
//! demo user holding every role, which keeps local development and the
//! kiosk stations unblocked.

use std::collections::HashSet;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stockroom_types::Error;

use crate::ApiError;

const ALL_ROLES: [&str; 5] = ["Admin", "Purchasing", "Floor", "AP", "Driver"];

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub roles: HashSet<String>,
}

impl CurrentUser {
    pub fn require_any(&self, required: &[&str]) -> Result<(), ApiError> {
        if required.iter().any(|role| self.roles.contains(*role)) {
            Ok(())
        } else {
            Err(Error::Forbidden.into())
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("demo")
            .to_string();
        let roles: HashSet<String> = match parts
            .headers
            .get("x-user-roles")
            .and_then(|value| value.to_str().ok())
        {
            Some(raw) => raw
                .split(',')
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect(),
            None => ALL_ROLES.iter().map(|role| role.to_string()).collect(),
        };
        Ok(Self { id, roles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id: "t".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }

    #[test]
    fn any_listed_role_suffices() {
        assert!(user(&["Driver"]).require_any(&["Purchasing", "Driver"]).is_ok());
        assert!(user(&["Floor"]).require_any(&["Purchasing", "Admin"]).is_err());
    }
}
