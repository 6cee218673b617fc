//! Conversation message and request types.

use serde::{Deserialize, Serialize};

/// The role of a conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The shopper typing into the chat widget.
    User,
    /// The hosted assistant.
    Assistant,
}

/// One message in a conversation.
///
/// Serializes as `{"role":"user","content":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message.
    pub role: Role,
    /// Plain text content.
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Outbound body of a chat request: `{"messages": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Full conversation history, oldest first.
    pub messages: &'a [ChatMessage],
}

impl<'a> ChatRequest<'a> {
    /// Wrap a message history.
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self { messages }
    }
}
