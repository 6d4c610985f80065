//! Chat turn types.
//!
//! One `ChatMessage` row is written per chat turn and holds both the user's
//! input and the generated reply. Rows are immutable once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Number of prior turns sent to the completion provider as context.
pub const HISTORY_TURN_LIMIT: u32 = 10;

/// Reply used when the provider returns no content.
pub const EMPTY_REPLY_FALLBACK: &str = "No response from AI";

/// A persisted chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: UserId,
    pub message: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

/// A chat turn that has not been written yet.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: UserId,
    pub message: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

impl NewChatMessage {
    /// Build a new turn stamped with the current time.
    pub fn new(user_id: UserId, message: String, reply: String) -> Self {
        Self {
            user_id,
            message,
            reply,
            created_at: Utc::now(),
        }
    }
}
