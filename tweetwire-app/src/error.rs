//! Error types for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tweetwire_social::twitter::TwitterError;

use crate::limit::FieldErrors;

/// Errors a route can end with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Query parameters failed validation.
    #[error("invalid query parameters: {0:?}")]
    Validation(FieldErrors),

    /// The path did not name a routable resource.
    #[error("not found")]
    NotFound,

    /// Anything that went wrong talking to, or making sense of, the upstream API.
    #[error("upstream failure: {0}")]
    Upstream(#[from] TwitterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Not found."})),
            )
                .into_response(),
            // cause is logged by the handler; clients only get the generic body
            ApiError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"internal server error": ["unknown error occurred."]})),
            )
                .into_response(),
        }
    }
}
