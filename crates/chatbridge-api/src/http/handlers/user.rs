//! POST /register-user

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use serde::Deserialize;

use chatbridge_types::user::RegisteredUser;

use super::{body_or_default, present};
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Register a user with the messaging platform and the local store.
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<Json<RegisteredUser>, AppError> {
    let body = body_or_default(payload);
    let (Some(name), Some(email)) = (present(body.name), present(body.email)) else {
        return Err(AppError::Validation(
            "Name and email are required".to_string(),
        ));
    };

    let registered = state.user_service.register_user(&name, &email).await?;
    Ok(Json(registered))
}
