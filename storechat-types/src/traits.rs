//! Transport trait.

use std::future::Future;

use crate::error::ChatError;
use crate::stream::DeltaSink;
use crate::types::ChatMessage;

/// Sends a conversation to a chat backend and streams the reply into a sink.
///
/// Uses RPITIT; not object-safe. Compose with generics `<T: ChatTransport>`.
///
/// # Contract
///
/// - `Ok(())` means the sink has received exactly one terminal callback
///   (`on_done` or `on_error`).
/// - `Err(_)` means the request failed before any response was available
///   and the sink was never called. The caller owns turning that into a
///   user-visible error.
pub trait ChatTransport: Send + Sync {
    /// Send `messages` and report the streamed reply to `sink`.
    fn stream_chat<S: DeltaSink>(
        &self,
        messages: &[ChatMessage],
        sink: &mut S,
    ) -> impl Future<Output = Result<(), ChatError>> + Send;
}
