//! Request handlers.
//!
//! Request bodies are read leniently: a body that is missing, not JSON, or
//! lacks a field is treated the same as one with that field absent, so every
//! such case produces the endpoint's own validation error.

pub mod chat;
pub mod messages;
pub mod user;

use axum::Json;
use axum::extract::rejection::JsonRejection;

/// Unwrap a JSON body, falling back to the all-fields-absent value.
pub(crate) fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable request body");
            T::default()
        }
    }
}

/// Absent, `null`, and `""` all count as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
