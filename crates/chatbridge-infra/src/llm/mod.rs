//! Completion provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `chatbridge-core`. Any endpoint speaking the OpenAI chat completions
//! protocol is served by [`openai_compat::OpenAiCompatibleProvider`].
//!
//! [`LlmProvider`]: chatbridge_core::llm::provider::LlmProvider

pub mod openai_compat;

use chatbridge_core::llm::box_provider::BoxLlmProvider;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Build the type-erased completion provider the services are wired with.
pub fn create_provider(config: OpenAiCompatConfig) -> BoxLlmProvider {
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
}
