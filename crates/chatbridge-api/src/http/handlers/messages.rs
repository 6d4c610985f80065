//! POST /get-messages

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatbridge_types::chat::ChatMessage;
use chatbridge_types::user::UserId;

use super::{body_or_default, present};
use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMessagesRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
}

/// Return every stored turn for a user.
///
/// A missing `userId` answers 404 rather than 400; existing clients
/// depend on that status.
pub async fn get_messages(
    State(state): State<AppState>,
    payload: Result<Json<GetMessagesRequest>, JsonRejection>,
) -> Result<Json<MessagesResponse>, AppError> {
    let body = body_or_default(payload);
    let Some(user_id) = present(body.user_id) else {
        return Err(AppError::NotFound("User ID is required".to_string()));
    };

    let messages = state
        .chat_service
        .get_messages(&UserId::new(user_id))
        .await?;
    Ok(Json(MessagesResponse { messages }))
}
