//! Stream Chat server-side REST client.
//!
//! Implements [`MessagingClient`] against the Stream Chat API using
//! `reqwest`, authenticating with a server token signed by the API secret.
//!
//! [`MessagingClient`]: chatbridge_core::messaging::client::MessagingClient

pub mod client;
pub mod token;
pub mod types;

pub use client::StreamChatClient;
