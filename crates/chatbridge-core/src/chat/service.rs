//! Chat service orchestrating a single chat turn and history reads.
//!
//! A turn runs strictly in sequence: platform user check, local user check,
//! history fetch, completion, persistence, then reply delivery into the
//! user's channel. Nothing here is transactional.

use std::sync::Arc;

use chatbridge_types::chat::{
    ChatMessage, NewChatMessage, EMPTY_REPLY_FALLBACK, HISTORY_TURN_LIMIT,
};
use chatbridge_types::error::ChatError;
use chatbridge_types::llm::CompletionRequest;
use chatbridge_types::messaging::{ChannelRef, MessagingError, OutgoingMessage, BOT_USER_ID};
use chatbridge_types::user::UserId;
use tracing::{debug, info, warn};

use crate::chat::context::build_conversation;
use crate::llm::box_provider::BoxLlmProvider;
use crate::messaging::box_client::BoxMessagingClient;
use crate::repository::chat::ChatRepository;
use crate::repository::user::UserRepository;

/// Orchestrates chat turns against the stores and both providers.
///
/// Generic over the repositories to keep chatbridge-core free of any
/// storage crate; the providers are type-erased so they can be shared with
/// [`crate::service::user::UserService`].
pub struct ChatService<U: UserRepository, C: ChatRepository> {
    user_repo: U,
    chat_repo: C,
    messaging: Arc<BoxMessagingClient>,
    llm: Arc<BoxLlmProvider>,
}

impl<U: UserRepository, C: ChatRepository> ChatService<U, C> {
    pub fn new(
        user_repo: U,
        chat_repo: C,
        messaging: Arc<BoxMessagingClient>,
        llm: Arc<BoxLlmProvider>,
    ) -> Self {
        Self {
            user_repo,
            chat_repo,
            messaging,
            llm,
        }
    }

    /// Run one chat turn and return the generated reply.
    ///
    /// Fails with `UnknownPlatformUser`/`UnknownLocalUser` before anything is
    /// written when the user is missing from either store. Once the turn is
    /// persisted, delivery failures are logged and the reply is still
    /// returned.
    pub async fn send_chat(&self, user_id: &UserId, message: &str) -> Result<String, ChatError> {
        if self.messaging.find_user(user_id.as_str()).await?.is_none() {
            return Err(ChatError::UnknownPlatformUser(user_id.to_string()));
        }

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(ChatError::UnknownLocalUser(user_id.to_string()));
        }

        let history = self
            .chat_repo
            .recent_for_user(user_id, HISTORY_TURN_LIMIT)
            .await?;
        let request = CompletionRequest::from_messages(build_conversation(&history, message));

        debug!(
            user_id = %user_id,
            history_turns = history.len(),
            messages = request.messages.len(),
            provider = self.llm.name(),
            "Requesting completion"
        );

        let response = self.llm.complete(&request).await?;
        let reply = response
            .content
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string());

        let saved = self
            .chat_repo
            .insert(&NewChatMessage::new(
                user_id.clone(),
                message.to_string(),
                reply.clone(),
            ))
            .await?;
        info!(user_id = %user_id, chat_id = saved.id, "Chat turn saved");

        if let Err(e) = self.deliver_reply(user_id, &reply).await {
            warn!(user_id = %user_id, error = %e, "Failed to deliver reply to channel");
        }

        Ok(reply)
    }

    /// All stored turns for a user. Unknown users simply have no turns.
    pub async fn get_messages(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.chat_repo.list_for_user(user_id).await?)
    }

    async fn deliver_reply(&self, user_id: &UserId, reply: &str) -> Result<(), MessagingError> {
        let channel = ChannelRef::for_user(user_id);
        self.messaging.ensure_channel(&channel, BOT_USER_ID).await?;
        self.messaging
            .send_message(&channel, &OutgoingMessage::from_bot(reply))
            .await?;
        debug!(channel_id = %channel, "Reply delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LlmProvider;
    use crate::messaging::client::MessagingClient;
    use chatbridge_types::error::RepositoryError;
    use chatbridge_types::llm::{
        CompletionResponse, LlmError, Message, MessageRole, StopReason, Usage,
    };
    use chatbridge_types::messaging::PlatformUser;
    use chatbridge_types::user::User;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    // --- In-memory repositories ---

    #[derive(Default, Clone)]
    struct MemUsers {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl MemUsers {
        fn with(user_id: &str) -> Self {
            let repo = Self::default();
            repo.users.lock().unwrap().push(User {
                user_id: UserId::new(user_id),
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                created_at: Utc::now(),
            });
            repo
        }
    }

    impl UserRepository for MemUsers {
        async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| &u.user_id == user_id)
                .cloned())
        }

        async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct MemChats {
        rows: Arc<Mutex<Vec<ChatMessage>>>,
    }

    impl MemChats {
        fn seed(&self, user_id: &str, count: usize) {
            let start = Utc::now() - Duration::hours(1);
            let mut rows = self.rows.lock().unwrap();
            for i in 0..count {
                let id = rows.len() as i64 + 1;
                rows.push(ChatMessage {
                    id,
                    user_id: UserId::new(user_id),
                    message: format!("q{i}"),
                    reply: format!("a{i}"),
                    created_at: start + Duration::seconds(i as i64),
                });
            }
        }

        fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl ChatRepository for MemChats {
        async fn insert(&self, message: &NewChatMessage) -> Result<ChatMessage, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let saved = ChatMessage {
                id: rows.len() as i64 + 1,
                user_id: message.user_id.clone(),
                message: message.message.clone(),
                reply: message.reply.clone(),
                created_at: message.created_at,
            };
            rows.push(saved.clone());
            Ok(saved)
        }

        async fn recent_for_user(
            &self,
            user_id: &UserId,
            limit: u32,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            let mut rows: Vec<ChatMessage> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by_key(|r| (r.created_at, r.id));
            let skip = rows.len().saturating_sub(limit as usize);
            Ok(rows.into_iter().skip(skip).collect())
        }

        async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    // --- Provider doubles ---

    #[derive(Default, Clone)]
    struct FakePlatform {
        users: Arc<Mutex<Vec<String>>>,
        channels: Arc<Mutex<Vec<(ChannelRef, String)>>>,
        sent: Arc<Mutex<Vec<(ChannelRef, OutgoingMessage)>>>,
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail_channel: bool,
        fail_send: bool,
    }

    impl MessagingClient for FakePlatform {
        async fn find_user(&self, user_id: &str) -> Result<Option<PlatformUser>, MessagingError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|id| id.as_str() == user_id)
                .map(|id| PlatformUser {
                    id: id.clone(),
                    name: None,
                    role: None,
                }))
        }

        async fn upsert_user(&self, user: &PlatformUser) -> Result<(), MessagingError> {
            self.users.lock().unwrap().push(user.id.clone());
            Ok(())
        }

        async fn ensure_channel(
            &self,
            channel: &ChannelRef,
            created_by_id: &str,
        ) -> Result<(), MessagingError> {
            self.calls.lock().unwrap().push("ensure_channel");
            if self.fail_channel {
                return Err(MessagingError::Api {
                    status: 400,
                    message: "channel rejected".to_string(),
                });
            }
            self.channels
                .lock()
                .unwrap()
                .push((channel.clone(), created_by_id.to_string()));
            Ok(())
        }

        async fn send_message(
            &self,
            channel: &ChannelRef,
            message: &OutgoingMessage,
        ) -> Result<(), MessagingError> {
            self.calls.lock().unwrap().push("send_message");
            if self.fail_send {
                return Err(MessagingError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((channel.clone(), message.clone()));
            Ok(())
        }
    }

    #[derive(Clone)]
    struct ScriptedLlm {
        reply: Option<String>,
        fail: bool,
        requests: Arc<Mutex<Vec<Vec<Message>>>>,
    }

    impl ScriptedLlm {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                fail: false,
                requests: Arc::default(),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                fail: true,
                requests: Arc::default(),
            }
        }
    }

    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.messages.clone());
            if self.fail {
                return Err(LlmError::Provider {
                    message: "HTTP 500".to_string(),
                });
            }
            Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: self.reply.clone(),
                model: "scripted-1".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn service(
        users: MemUsers,
        chats: MemChats,
        platform: FakePlatform,
        llm: ScriptedLlm,
    ) -> ChatService<MemUsers, MemChats> {
        ChatService::new(
            users,
            chats,
            Arc::new(BoxMessagingClient::new(platform)),
            Arc::new(BoxLlmProvider::new(llm)),
        )
    }

    fn registered_platform(user_id: &str) -> FakePlatform {
        let platform = FakePlatform::default();
        platform.users.lock().unwrap().push(user_id.to_string());
        platform
    }

    #[tokio::test]
    async fn test_send_chat_persists_and_delivers_reply() {
        let chats = MemChats::default();
        let platform = registered_platform("a_x_com");
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            platform.clone(),
            ScriptedLlm::replying(Some("hello there")),
        );

        let reply = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap();
        assert_eq!(reply, "hello there");

        let rows = chats.rows.lock().unwrap().clone();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "hi");
        assert_eq!(rows[0].reply, "hello there");

        let sent = platform.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.id, "chat-a_x_com");
        assert_eq!(sent[0].1.user_id, "ai_bot");
        assert_eq!(sent[0].1.text, "hello there");

        let channels = platform.channels.lock().unwrap().clone();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].0.to_string(), "messaging:chat-a_x_com");
        assert_eq!(channels[0].1, "ai_bot");
        assert_eq!(
            *platform.calls.lock().unwrap(),
            vec!["ensure_channel", "send_message"]
        );
    }

    #[tokio::test]
    async fn test_three_prior_turns_send_seven_messages() {
        let chats = MemChats::default();
        chats.seed("a_x_com", 3);
        let llm = ScriptedLlm::replying(Some("ok"));
        let svc = service(
            MemUsers::with("a_x_com"),
            chats,
            registered_platform("a_x_com"),
            llm.clone(),
        );

        svc.send_chat(&UserId::new("a_x_com"), "fourth").await.unwrap();

        let requests = llm.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].len(), 7);
        assert_eq!(requests[0][6], Message::user("fourth"));
    }

    #[tokio::test]
    async fn test_context_capped_at_ten_most_recent_turns() {
        let chats = MemChats::default();
        chats.seed("a_x_com", 13);
        chats.seed("someone_else", 2);
        let llm = ScriptedLlm::replying(Some("ok"));
        let svc = service(
            MemUsers::with("a_x_com"),
            chats,
            registered_platform("a_x_com"),
            llm.clone(),
        );

        svc.send_chat(&UserId::new("a_x_com"), "latest").await.unwrap();

        let sent = llm.requests.lock().unwrap()[0].clone();
        assert_eq!(sent.len(), 21);
        // Turns q0..q2 fall outside the window; q3..q12 remain in order.
        assert_eq!(sent[0], Message::user("q3"));
        assert_eq!(sent[1], Message::assistant("a3"));
        assert_eq!(sent[18], Message::user("q12"));
        assert_eq!(sent[19], Message::assistant("a12"));
        assert_eq!(sent[20].role, MessageRole::User);
        assert_eq!(sent[20].content, "latest");
    }

    #[tokio::test]
    async fn test_unknown_platform_user_writes_nothing() {
        let chats = MemChats::default();
        let llm = ScriptedLlm::replying(Some("ok"));
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            FakePlatform::default(),
            llm.clone(),
        );

        let err = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::UnknownPlatformUser(_)));
        assert_eq!(chats.count(), 0);
        assert!(llm.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_local_user_writes_nothing() {
        let chats = MemChats::default();
        let svc = service(
            MemUsers::default(),
            chats.clone(),
            registered_platform("a_x_com"),
            ScriptedLlm::replying(Some("ok")),
        );

        let err = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::UnknownLocalUser(_)));
        assert_eq!(chats.count(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_uses_fallback_reply() {
        let chats = MemChats::default();
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            registered_platform("a_x_com"),
            ScriptedLlm::replying(None),
        );

        let reply = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap();
        assert_eq!(reply, "No response from AI");
        assert_eq!(chats.rows.lock().unwrap()[0].reply, "No response from AI");
    }

    #[tokio::test]
    async fn test_empty_content_is_kept_verbatim() {
        let chats = MemChats::default();
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            registered_platform("a_x_com"),
            ScriptedLlm::replying(Some("")),
        );

        let reply = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap();
        assert_eq!(reply, "");
        assert_eq!(chats.rows.lock().unwrap()[0].reply, "");
    }

    #[tokio::test]
    async fn test_completion_failure_writes_nothing() {
        let chats = MemChats::default();
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            registered_platform("a_x_com"),
            ScriptedLlm::failing(),
        );

        let err = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));
        assert_eq!(chats.count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_returns_reply() {
        let chats = MemChats::default();
        let mut platform = registered_platform("a_x_com");
        platform.fail_send = true;
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            platform,
            ScriptedLlm::replying(Some("kept")),
        );

        let reply = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap();
        assert_eq!(reply, "kept");
        assert_eq!(chats.count(), 1);
    }

    #[tokio::test]
    async fn test_channel_failure_skips_send_and_returns_reply() {
        let chats = MemChats::default();
        let mut platform = registered_platform("a_x_com");
        platform.fail_channel = true;
        let svc = service(
            MemUsers::with("a_x_com"),
            chats.clone(),
            platform.clone(),
            ScriptedLlm::replying(Some("kept")),
        );

        let reply = svc.send_chat(&UserId::new("a_x_com"), "hi").await.unwrap();
        assert_eq!(reply, "kept");
        assert_eq!(chats.count(), 1);
        assert!(platform.sent.lock().unwrap().is_empty());
        assert_eq!(*platform.calls.lock().unwrap(), vec!["ensure_channel"]);
    }

    #[tokio::test]
    async fn test_get_messages_only_returns_own_rows() {
        let chats = MemChats::default();
        chats.seed("a_x_com", 2);
        chats.seed("b_x_com", 3);
        let svc = service(
            MemUsers::default(),
            chats,
            FakePlatform::default(),
            ScriptedLlm::replying(None),
        );

        let rows = svc.get_messages(&UserId::new("b_x_com")).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.user_id.as_str() == "b_x_com"));
    }
}
