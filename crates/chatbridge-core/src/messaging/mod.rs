//! Messaging-platform abstractions for chatbridge.
//!
//! - `MessagingClient`: RPITIT trait for the platform's server-side API
//! - `BoxMessagingClient`: Object-safe wrapper for dynamic dispatch

pub mod box_client;
pub mod client;
