//! MessagingClient trait definition.

use chatbridge_types::messaging::{ChannelRef, MessagingError, OutgoingMessage, PlatformUser};

/// Server-side operations against the messaging platform.
///
/// Implementations live in chatbridge-infra (e.g., `StreamChatClient`).
pub trait MessagingClient: Send + Sync {
    /// Look up a user in the platform directory by exact id.
    fn find_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<PlatformUser>, MessagingError>> + Send;

    /// Create or replace a user in the platform directory.
    fn upsert_user(
        &self,
        user: &PlatformUser,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;

    /// Create the channel if it does not exist yet. Succeeds if it already does.
    fn ensure_channel(
        &self,
        channel: &ChannelRef,
        created_by_id: &str,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;

    /// Post a message into a channel.
    fn send_message(
        &self,
        channel: &ChannelRef,
        message: &OutgoingMessage,
    ) -> impl std::future::Future<Output = Result<(), MessagingError>> + Send;
}
