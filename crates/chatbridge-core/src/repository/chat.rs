//! ChatRepository trait definition.
//!
//! Chat rows are append-only: there is no update or delete.

use chatbridge_types::chat::{ChatMessage, NewChatMessage};
use chatbridge_types::error::RepositoryError;
use chatbridge_types::user::UserId;

/// Repository trait for chat turn persistence.
///
/// Implementations live in chatbridge-infra (e.g., `SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    /// Persist a chat turn and return it with its assigned id.
    fn insert(
        &self,
        message: &NewChatMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// The `limit` most recent turns for a user, oldest first.
    fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Every turn for a user, in storage order.
    fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
