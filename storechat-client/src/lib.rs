//! HTTP client for the storefront's hosted streaming chat function.
//!
//! [`ChatClient`] posts the conversation history as JSON and feeds the
//! streamed reply through [`storechat_stream::decode`] into a [`DeltaSink`].

pub mod client;
pub mod config;
pub(crate) mod error;

pub use client::ChatClient;
pub use config::ChatConfig;

// Re-export storechat-types for convenience
pub use storechat_types::{ChatError, ChatEvent, ChatMessage, ChatStream, ChatTransport, DeltaSink};
