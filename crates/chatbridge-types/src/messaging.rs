//! Messaging-platform payload types.
//!
//! The platform keeps its own user directory and one channel per local
//! user. Replies are posted into that channel by a fixed bot identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::UserId;

/// Identity that creates reply channels and posts replies.
pub const BOT_USER_ID: &str = "ai_bot";

/// Channel type used for per-user reply channels.
pub const CHANNEL_TYPE: &str = "messaging";

/// Role assigned to users upserted by the registration flow.
pub const DEFAULT_USER_ROLE: &str = "user";

/// A user record in the messaging platform's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl PlatformUser {
    /// A regular user with the given id and display name.
    pub fn member(user_id: &UserId, name: &str) -> Self {
        Self {
            id: user_id.to_string(),
            name: Some(name.to_string()),
            role: Some(DEFAULT_USER_ROLE.to_string()),
        }
    }
}

/// Address of a channel: `{channel_type}:{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef {
    pub channel_type: String,
    pub id: String,
}

impl ChannelRef {
    /// The reply channel for a user, `messaging:chat-<userId>`.
    pub fn for_user(user_id: &UserId) -> Self {
        Self {
            channel_type: CHANNEL_TYPE.to_string(),
            id: format!("chat-{user_id}"),
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.channel_type, self.id)
    }
}

/// A message to post into a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub user_id: String,
}

impl OutgoingMessage {
    /// A message sent as [`BOT_USER_ID`].
    pub fn from_bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id: BOT_USER_ID.to_string(),
        }
    }
}

/// Errors from messaging-platform operations.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("token error: {0}")]
    Token(String),
}
