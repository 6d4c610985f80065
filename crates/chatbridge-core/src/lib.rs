//! Business logic and port definitions for chatbridge.
//!
//! This crate defines the "ports" (repository, messaging, and completion
//! traits) that the infrastructure layer implements, plus the services the
//! HTTP handlers call. It depends only on `chatbridge-types` -- never on
//! `chatbridge-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod messaging;
pub mod repository;
pub mod service;
