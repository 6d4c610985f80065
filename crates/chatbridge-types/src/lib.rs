//! Shared domain types for chatbridge.
//!
//! This crate contains the core domain types used across the bridge:
//! users, chat turns, completion requests, messaging-platform payloads,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod messaging;
pub mod user;
