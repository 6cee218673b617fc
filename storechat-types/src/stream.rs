//! Streaming event types and the delta sink observer.

use std::pin::Pin;

use futures::Stream;

/// An event emitted while a chat reply streams in.
///
/// A well-formed event sequence is zero or more [`ChatEvent::Delta`] followed
/// by exactly one terminal event ([`ChatEvent::Done`] or [`ChatEvent::Error`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Incremental assistant text.
    Delta(String),
    /// The reply finished, either via `[DONE]` or a clean end of body.
    Done,
    /// The reply failed; the message is human-readable.
    Error(String),
}

impl ChatEvent {
    /// Whether this event ends the sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }

    /// The delta text, if this is a [`ChatEvent::Delta`].
    pub fn as_delta(&self) -> Option<&str> {
        match self {
            Self::Delta(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Handle to a streaming chat reply.
pub struct ChatStream {
    /// The stream of events. Consume with `StreamExt::next()`.
    pub receiver: Pin<Box<dyn Stream<Item = ChatEvent> + Send>>,
}

/// Receiver of decoded deltas and the terminal signal.
///
/// The decoder calls [`on_delta`](DeltaSink::on_delta) zero or more times in
/// frame order, then exactly one of [`on_done`](DeltaSink::on_done) or
/// [`on_error`](DeltaSink::on_error). Calls are synchronous with decoding, so
/// a slow sink throttles the read loop.
pub trait DeltaSink: Send {
    /// A non-empty fragment of assistant text.
    fn on_delta(&mut self, text: &str);

    /// The reply completed.
    fn on_done(&mut self);

    /// The reply failed.
    fn on_error(&mut self, message: &str);
}

impl<S: DeltaSink + ?Sized> DeltaSink for &mut S {
    fn on_delta(&mut self, text: &str) {
        (**self).on_delta(text);
    }

    fn on_done(&mut self) {
        (**self).on_done();
    }

    fn on_error(&mut self, message: &str) {
        (**self).on_error(message);
    }
}

/// Collects every callback as a [`ChatEvent`], in order.
impl DeltaSink for Vec<ChatEvent> {
    fn on_delta(&mut self, text: &str) {
        self.push(ChatEvent::Delta(text.to_string()));
    }

    fn on_done(&mut self) {
        self.push(ChatEvent::Done);
    }

    fn on_error(&mut self, message: &str) {
        self.push(ChatEvent::Error(message.to_string()));
    }
}

/// A [`DeltaSink`] built from three closures. See [`callbacks`].
pub struct Callbacks<D, F, E> {
    on_delta: D,
    on_done: F,
    on_error: E,
}

/// Build a [`DeltaSink`] from `on_delta`, `on_done` and `on_error` closures.
///
/// ```
/// use storechat_types::{callbacks, DeltaSink};
///
/// let mut text = String::new();
/// let mut finished = false;
/// {
///     let mut sink = callbacks(|d: &str| text.push_str(d), || finished = true, |_: &str| {});
///     sink.on_delta("Hi");
///     sink.on_done();
/// }
/// assert_eq!(text, "Hi");
/// assert!(finished);
/// ```
pub fn callbacks<D, F, E>(on_delta: D, on_done: F, on_error: E) -> Callbacks<D, F, E>
where
    D: FnMut(&str) + Send,
    F: FnMut() + Send,
    E: FnMut(&str) + Send,
{
    Callbacks {
        on_delta,
        on_done,
        on_error,
    }
}

impl<D, F, E> DeltaSink for Callbacks<D, F, E>
where
    D: FnMut(&str) + Send,
    F: FnMut() + Send,
    E: FnMut(&str) + Send,
{
    fn on_delta(&mut self, text: &str) {
        (self.on_delta)(text);
    }

    fn on_done(&mut self) {
        (self.on_done)();
    }

    fn on_error(&mut self, message: &str) {
        (self.on_error)(message);
    }
}
