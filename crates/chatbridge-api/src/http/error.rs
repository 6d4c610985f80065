//! Application error type mapping to HTTP status codes.
//!
//! Client mistakes carry their message through; everything downstream is
//! logged and collapsed into a generic 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatbridge_types::error::{ChatError, UserError};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request fields (400).
    Validation(String),
    /// Unknown user, or the get-messages missing-field case (404).
    NotFound(String),
    /// Downstream failure; the detail is logged, never returned.
    Internal(String),
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::UnknownPlatformUser(_) => {
                AppError::NotFound("User not found. Please register first".to_string())
            }
            ChatError::UnknownLocalUser(_) => {
                AppError::NotFound("User not found in database. Please register first".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
