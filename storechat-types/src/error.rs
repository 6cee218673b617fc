//! Error types for all storechat crates.

use std::time::Duration;

/// Errors from the chat transport and stream decoder.
///
/// The `Display` output of each variant is the human-readable string handed to
/// [`DeltaSink::on_error`](crate::DeltaSink::on_error).
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    // Surfaced through the sink
    /// The chat function answered with a non-2xx status.
    #[error("{message}")]
    TransportRejected {
        /// HTTP status code.
        status: u16,
        /// Message taken from the error body, or `Error: <status>`.
        message: String,
    },
    /// The response carried no readable body.
    #[error("No response body")]
    BodyUnavailable,
    /// Reading the body failed mid-stream.
    #[error("stream read error: {0}")]
    StreamRead(String),
    /// The stream was cancelled by the caller.
    #[error("stream cancelled")]
    Cancelled,

    // Returned to the calling layer
    /// Network-level error before a response arrived.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Missing or malformed configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Whether this error is likely transient and the request can be retried.
    ///
    /// The decoder never retries; this is advisory for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::StreamRead(_) => true,
            Self::TransportRejected { status, .. } => *status == 429 || *status >= 500,
            Self::BodyUnavailable | Self::Cancelled | Self::Config(_) => false,
        }
    }
}
