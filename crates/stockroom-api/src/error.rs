//! Error-to-response mapping

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockroom_types::Error;

/// Wrapper turning domain errors into JSON error responses shaped
/// `{"detail": <code>}`.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self(Error::Import(format!("Invalid upload: {error}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::NotFound(code) => (StatusCode::NOT_FOUND, (*code).to_string()),
            Error::Validation(code) => (StatusCode::BAD_REQUEST, (*code).to_string()),
            Error::Forbidden => (StatusCode::FORBIDDEN, "insufficient_role".to_string()),
            Error::Import(message) => (StatusCode::BAD_REQUEST, message.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
