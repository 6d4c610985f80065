//! Application state wiring all services together.
//!
//! Services are generic over repository traits, but AppState pins them to
//! the SQLite implementations. The messaging and completion clients are
//! shared by both services.

use std::sync::Arc;

use chatbridge_core::chat::service::ChatService;
use chatbridge_core::llm::box_provider::BoxLlmProvider;
use chatbridge_core::messaging::box_client::BoxMessagingClient;
use chatbridge_core::service::user::UserService;
use chatbridge_infra::config::BridgeConfig;
use chatbridge_infra::sqlite::chat::SqliteChatRepository;
use chatbridge_infra::sqlite::pool::DatabasePool;
use chatbridge_infra::sqlite::user::SqliteUserRepository;

pub type ConcreteUserService = UserService<SqliteUserRepository>;

pub type ConcreteChatService = ChatService<SqliteUserRepository, SqliteChatRepository>;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<ConcreteUserService>,
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Connect to the database and build both external clients.
    pub async fn init(config: &BridgeConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::connect(&config.database_url, config.run_migrations).await?;
        let messaging = Arc::new(config.messaging_client()?);
        let llm = Arc::new(config.llm_provider());

        tracing::info!(
            provider = llm.name(),
            model = llm.model(),
            "Application state initialized"
        );

        Ok(Self::from_parts(db_pool, messaging, llm))
    }

    /// Wire services from an open pool and already-built clients.
    pub fn from_parts(
        db_pool: DatabasePool,
        messaging: Arc<BoxMessagingClient>,
        llm: Arc<BoxLlmProvider>,
    ) -> Self {
        let user_service = UserService::new(
            SqliteUserRepository::new(db_pool.clone()),
            messaging.clone(),
        );
        let chat_service = ChatService::new(
            SqliteUserRepository::new(db_pool.clone()),
            SqliteChatRepository::new(db_pool),
            messaging,
            llm,
        );

        Self {
            user_service: Arc::new(user_service),
            chat_service: Arc::new(chat_service),
        }
    }
}
