//! Runtime configuration for the bridge.
//!
//! Assembled by the binary from CLI flags and environment variables, then
//! used to construct the database pool and the two external clients.

use secrecy::SecretString;

use chatbridge_core::llm::box_provider::BoxLlmProvider;
use chatbridge_core::messaging::box_client::BoxMessagingClient;
use chatbridge_types::config::ServerConfig;
use chatbridge_types::messaging::MessagingError;

use crate::llm::create_provider;
use crate::llm::openai_compat::config::OpenAiCompatConfig;
use crate::stream::StreamChatClient;

/// Everything needed to run the service.
///
/// Secrets are `SecretString`, so the derived Debug prints them redacted.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub database_url: String,
    /// Apply embedded migrations when the pool opens.
    pub run_migrations: bool,
    pub server: ServerConfig,
    pub stream_api_key: String,
    pub stream_api_secret: SecretString,
    pub stream_base_url: String,
    pub openai_api_key: SecretString,
    pub openai_base_url: String,
    pub model: String,
    pub enable_otel: bool,
}

impl BridgeConfig {
    /// Build the Stream Chat client.
    pub fn messaging_client(&self) -> Result<BoxMessagingClient, MessagingError> {
        let client = StreamChatClient::new(
            self.stream_api_key.clone(),
            &self.stream_api_secret,
            self.stream_base_url.clone(),
        )?;
        Ok(BoxMessagingClient::new(client))
    }

    /// Build the completion provider.
    pub fn llm_provider(&self) -> BoxLlmProvider {
        create_provider(OpenAiCompatConfig {
            provider_name: "openai".to_string(),
            base_url: self.openai_base_url.clone(),
            api_key: self.openai_api_key.clone(),
            model: self.model.clone(),
        })
    }
}
