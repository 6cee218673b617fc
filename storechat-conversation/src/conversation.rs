//! The conversation state machine.

use storechat_types::{ChatMessage, ChatTransport, DeltaSink, Role};

/// Error stored when the transport fails before any reply arrives.
pub const SEND_FAILED: &str = "Failed to send message";

/// A chat conversation with one streamed reply in flight at a time.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    is_loading: bool,
    error: Option<String>,
}

impl Conversation {
    /// An empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is being streamed.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The error reported by the last turn, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The most recent assistant message, if any.
    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Assistant)
    }

    /// Drop all messages and the last error.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }

    /// Send `input` as a user message and stream the reply.
    ///
    /// Blank input is ignored. The whole history, including the new message,
    /// is sent. Deltas grow one assistant message for this turn. A failure
    /// reported by the stream is stored as-is; a transport failure is stored
    /// as [`SEND_FAILED`].
    pub async fn send_message<T: ChatTransport>(&mut self, transport: &T, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        self.messages.push(ChatMessage::user(input));
        self.is_loading = true;
        self.error = None;

        let history = self.messages.clone();
        let mut turn = Turn {
            conversation: self,
            text: String::new(),
        };
        if let Err(err) = transport.stream_chat(&history, &mut turn).await {
            tracing::error!(error = %err, "chat error");
            self.error = Some(SEND_FAILED.to_string());
            self.is_loading = false;
        }
    }

    /// Replace the trailing assistant message with `text`, or open one.
    fn upsert_assistant(&mut self, text: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.content.clear();
                last.content.push_str(text);
            }
            _ => self.messages.push(ChatMessage::assistant(text)),
        }
    }
}

/// Sink for one streamed reply.
struct Turn<'a> {
    conversation: &'a mut Conversation,
    text: String,
}

impl DeltaSink for Turn<'_> {
    fn on_delta(&mut self, text: &str) {
        self.text.push_str(text);
        self.conversation.upsert_assistant(&self.text);
    }

    fn on_done(&mut self) {
        self.conversation.is_loading = false;
    }

    fn on_error(&mut self, message: &str) {
        self.conversation.error = Some(message.to_string());
        self.conversation.is_loading = false;
    }
}
