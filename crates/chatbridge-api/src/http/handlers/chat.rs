//! POST /chat

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatbridge_types::user::UserId;

use super::{body_or_default, present};
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Run one chat turn and return the generated reply.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let body = body_or_default(payload);
    let (Some(message), Some(user_id)) = (present(body.message), present(body.user_id)) else {
        return Err(AppError::Validation(
            "Message and user are required".to_string(),
        ));
    };

    let reply = state
        .chat_service
        .send_chat(&UserId::new(user_id), &message)
        .await?;
    Ok(Json(ChatResponse { reply }))
}
