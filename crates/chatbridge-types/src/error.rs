use thiserror::Error;

use crate::llm::LlmError;
use crate::messaging::MessagingError;

/// Errors from repository operations (used by trait definitions in chatbridge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the registration flow.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("messaging platform error: {0}")]
    Messaging(#[from] MessagingError),
}

/// Errors from a chat turn or a history read.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("user '{0}' is not registered with the messaging platform")]
    UnknownPlatformUser(String),

    #[error("user '{0}' is not registered locally")]
    UnknownLocalUser(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("messaging platform error: {0}")]
    Messaging(#[from] MessagingError),

    #[error("completion error: {0}")]
    Completion(#[from] LlmError),
}
