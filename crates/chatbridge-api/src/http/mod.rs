//! HTTP layer: three POST endpoints plus a health check, returning plain
//! JSON bodies and `{"error": ...}` on failure.

pub mod error;
pub mod handlers;
pub mod router;
