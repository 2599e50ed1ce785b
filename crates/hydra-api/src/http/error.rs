//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hydra_types::error::StoreError;

/// Application-level error that maps to JSON HTTP responses.
///
/// Backend failures never appear here: the engine converts them into
/// diagnostic replies before the handler sees them. What remains is client
/// validation and store failures.
#[derive(Debug)]
pub enum AppError {
    /// The request carried neither text nor an image.
    Validation(String),
    /// Session history could not be read or written.
    Store(StoreError),
    /// Malformed request body (e.g., unreadable multipart).
    BadRequest(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {e}"),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("No message or image provided".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let response =
            AppError::Store(StoreError::Unavailable("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
