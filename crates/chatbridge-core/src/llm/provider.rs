//! LlmProvider trait definition.
//!
//! This is the abstraction every completion backend implements. One call in,
//! one generated reply out; no streaming.

use chatbridge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion provider backends (OpenAI and compatible APIs).
///
/// Implementations live in chatbridge-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
