//! Infrastructure layer for chatbridge.
//!
//! Concrete implementations of the ports defined in `chatbridge-core`:
//! SQLite repositories, the Stream Chat REST client, and the
//! OpenAI-compatible completion provider.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod stream;
