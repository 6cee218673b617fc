//! The decode loop: bytes in, deltas and one terminal signal out.

use std::fmt::Display;

use futures::{Stream, StreamExt};
use serde_json::Value;
use storechat_types::{ChatError, ChatEvent, DeltaSink};
use tokio_util::sync::CancellationToken;

use crate::frame::{Frame, extract_delta, parse_line};
use crate::line_buffer::LineBuffer;
use crate::utf8::Utf8Decoder;

/// Synchronous decoding state for one reply.
///
/// Feed raw body chunks with [`feed`](Self::feed) / [`push`](Self::push) and
/// call [`flush`](Self::flush) / [`finish`](Self::finish) once the body ends.
/// After the `[DONE]` sentinel, all further input is ignored.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8Decoder,
    lines: LineBuffer,
    /// `[DONE]` seen.
    done: bool,
    /// Final flush already ran.
    flushed: bool,
}

impl FrameDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been decoded.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Text buffered but not yet resolved into frames.
    pub fn buffered(&self) -> &str {
        self.lines.as_str()
    }

    /// Decode one chunk, calling `emit` for each delta in frame order.
    ///
    /// A data line whose payload is not valid JSON is put back at the front
    /// of the buffer and extraction stops until the next chunk arrives.
    pub fn feed(&mut self, chunk: &[u8], mut emit: impl FnMut(&str)) {
        if self.done || self.flushed {
            return;
        }
        let mut text = String::new();
        self.utf8.decode(chunk, &mut text);
        self.lines.push_str(&text);

        while let Some(line) = self.lines.next_line() {
            match parse_line(&line) {
                Frame::Ignored => continue,
                Frame::Done => {
                    tracing::debug!(discarded = self.lines.as_str().len(), "done sentinel received");
                    self.done = true;
                    self.lines.clear();
                    return;
                }
                Frame::Data(payload) => match serde_json::from_str::<Value>(payload) {
                    Ok(value) => {
                        if let Some(delta) = extract_delta(&value) {
                            emit(delta);
                        }
                    }
                    Err(e) => {
                        tracing::trace!(error = %e, "incomplete frame, waiting for more bytes");
                        self.lines.unread_line(&line);
                        return;
                    }
                },
            }
        }
    }

    /// Decode one chunk and collect its deltas.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut deltas = Vec::new();
        self.feed(chunk, |d| deltas.push(d.to_string()));
        deltas
    }

    /// End of body: decode whatever is still buffered, once.
    ///
    /// The residue is split on `\n` (a residue without newlines is one line)
    /// and each line goes through the same rules as [`feed`](Self::feed),
    /// except that unparseable payloads are dropped since no more bytes will
    /// arrive to complete them. Does nothing after `[DONE]`.
    pub fn flush(&mut self, mut emit: impl FnMut(&str)) {
        if self.done || self.flushed {
            return;
        }
        self.flushed = true;

        let mut tail = String::new();
        self.utf8.finish(&mut tail);
        self.lines.push_str(&tail);
        let residue = self.lines.take_remainder();

        for raw in residue.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match parse_line(line) {
                Frame::Ignored => continue,
                Frame::Done => {
                    self.done = true;
                    return;
                }
                Frame::Data(payload) => match serde_json::from_str::<Value>(payload) {
                    Ok(value) => {
                        if let Some(delta) = extract_delta(&value) {
                            emit(delta);
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, len = payload.len(), "discarding incomplete trailing frame");
                    }
                },
            }
        }
    }

    /// End of body: collect the deltas produced by [`flush`](Self::flush).
    pub fn finish(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        self.flush(|d| deltas.push(d.to_string()));
        deltas
    }
}

/// Decode a response body into `sink`.
///
/// Reads one chunk at a time until the `[DONE]` sentinel or the end of the
/// body, calling [`DeltaSink::on_delta`] for each delta, then
/// [`DeltaSink::on_done`] once. A failed read calls [`DeltaSink::on_error`]
/// once instead and stops; `on_done` is not called on that path.
pub async fn decode<St, B, E, S>(byte_stream: St, sink: &mut S)
where
    St: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    S: DeltaSink + ?Sized,
{
    run(byte_stream, sink, None).await;
}

/// Like [`decode`], but stops with `on_error("stream cancelled")` as soon as
/// `token` is cancelled.
pub async fn decode_cancellable<St, B, E, S>(
    byte_stream: St,
    sink: &mut S,
    token: &CancellationToken,
) where
    St: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    S: DeltaSink + ?Sized,
{
    run(byte_stream, sink, Some(token)).await;
}

async fn run<St, B, E, S>(byte_stream: St, sink: &mut S, cancel: Option<&CancellationToken>)
where
    St: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    S: DeltaSink + ?Sized,
{
    let mut decoder = FrameDecoder::new();
    let mut byte_stream = std::pin::pin!(byte_stream);

    while !decoder.is_done() {
        let next = tokio::select! {
            biased;
            () = cancelled(cancel) => {
                tracing::debug!("chat stream cancelled");
                sink.on_error(&ChatError::Cancelled.to_string());
                return;
            }
            next = byte_stream.next() => next,
        };

        match next {
            Some(Ok(chunk)) => decoder.feed(chunk.as_ref(), |d| sink.on_delta(d)),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "chat stream read failed");
                sink.on_error(&ChatError::StreamRead(e.to_string()).to_string());
                return;
            }
            None => break,
        }
    }

    decoder.flush(|d| sink.on_delta(d));
    sink.on_done();
}

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Decode a response body into a stream of [`ChatEvent`]s.
///
/// Yields `Delta` events, then exactly one `Done` or `Error`, then ends.
pub fn decode_stream<St, B, E>(byte_stream: St) -> impl Stream<Item = ChatEvent> + Send + 'static
where
    St: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut decoder = FrameDecoder::new();
        let mut byte_stream = std::pin::pin!(byte_stream);

        while !decoder.is_done() {
            match byte_stream.next().await {
                Some(Ok(chunk)) => {
                    for delta in decoder.push(chunk.as_ref()) {
                        yield ChatEvent::Delta(delta);
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "chat stream read failed");
                    yield ChatEvent::Error(ChatError::StreamRead(e.to_string()).to_string());
                    return;
                }
                None => break,
            }
        }

        for delta in decoder.finish() {
            yield ChatEvent::Delta(delta);
        }
        yield ChatEvent::Done;
    }
}
