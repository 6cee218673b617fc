//! Conversation state driven by a streaming [`ChatTransport`].
//!
//! [`Conversation`] holds the message history, a loading flag and the last
//! error. [`Conversation::send_message`] appends the user's message, streams
//! the reply and grows a single assistant message as deltas arrive.

pub mod conversation;

pub use conversation::Conversation;

// Re-export storechat-types for convenience
pub use storechat_types::{ChatMessage, ChatTransport, Role};
