//! Chat turn orchestration: context assembly and the chat service.

pub mod context;
pub mod service;
