//! Observability setup for chatbridge.

pub mod tracing_setup;
