//! BoxMessagingClient -- object-safe wrapper for MessagingClient.
//!
//! Same blanket-impl pattern as `BoxLlmProvider`.

use std::future::Future;
use std::pin::Pin;

use chatbridge_types::messaging::{ChannelRef, MessagingError, OutgoingMessage, PlatformUser};

use super::client::MessagingClient;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, MessagingError>> + Send + 'a>>;

/// Object-safe version of [`MessagingClient`] with boxed futures.
pub trait MessagingClientDyn: Send + Sync {
    fn find_user_boxed<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Option<PlatformUser>>;

    fn upsert_user_boxed<'a>(&'a self, user: &'a PlatformUser) -> BoxFuture<'a, ()>;

    fn ensure_channel_boxed<'a>(
        &'a self,
        channel: &'a ChannelRef,
        created_by_id: &'a str,
    ) -> BoxFuture<'a, ()>;

    fn send_message_boxed<'a>(
        &'a self,
        channel: &'a ChannelRef,
        message: &'a OutgoingMessage,
    ) -> BoxFuture<'a, ()>;
}

impl<T: MessagingClient> MessagingClientDyn for T {
    fn find_user_boxed<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Option<PlatformUser>> {
        Box::pin(self.find_user(user_id))
    }

    fn upsert_user_boxed<'a>(&'a self, user: &'a PlatformUser) -> BoxFuture<'a, ()> {
        Box::pin(self.upsert_user(user))
    }

    fn ensure_channel_boxed<'a>(
        &'a self,
        channel: &'a ChannelRef,
        created_by_id: &'a str,
    ) -> BoxFuture<'a, ()> {
        Box::pin(self.ensure_channel(channel, created_by_id))
    }

    fn send_message_boxed<'a>(
        &'a self,
        channel: &'a ChannelRef,
        message: &'a OutgoingMessage,
    ) -> BoxFuture<'a, ()> {
        Box::pin(self.send_message(channel, message))
    }
}

/// Type-erased messaging client.
pub struct BoxMessagingClient {
    inner: Box<dyn MessagingClientDyn + Send + Sync>,
}

impl BoxMessagingClient {
    /// Wrap a concrete `MessagingClient` in a type-erased box.
    pub fn new<T: MessagingClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub async fn find_user(&self, user_id: &str) -> Result<Option<PlatformUser>, MessagingError> {
        self.inner.find_user_boxed(user_id).await
    }

    pub async fn upsert_user(&self, user: &PlatformUser) -> Result<(), MessagingError> {
        self.inner.upsert_user_boxed(user).await
    }

    pub async fn ensure_channel(
        &self,
        channel: &ChannelRef,
        created_by_id: &str,
    ) -> Result<(), MessagingError> {
        self.inner.ensure_channel_boxed(channel, created_by_id).await
    }

    pub async fn send_message(
        &self,
        channel: &ChannelRef,
        message: &OutgoingMessage,
    ) -> Result<(), MessagingError> {
        self.inner.send_message_boxed(channel, message).await
    }
}
