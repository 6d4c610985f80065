//! Configuration for OpenAI-compatible providers.

use secrecy::SecretString;

use chatbridge_types::config::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name, reported on the completion span.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request does not name one.
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`. An empty `model` selects `gpt-4`.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: DEFAULT_OPENAI_BASE_URL.into(),
        api_key,
        model: if model.is_empty() {
            DEFAULT_MODEL.into()
        } else {
            model.into()
        },
    }
}
