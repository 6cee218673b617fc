//! Shared vocabulary for the storechat crates.
//!
//! - [`ChatMessage`] / [`Role`]: the conversation history sent to the chat function.
//! - [`ChatEvent`] / [`ChatStream`]: the tagged-event rendering of a streamed reply.
//! - [`DeltaSink`]: the three-callback observer the stream decoder reports to.
//! - [`ChatTransport`]: the seam between a conversation and the HTTP client.
//! - [`ChatError`]: every failure the transport and decoder can surface.

pub mod error;
pub mod stream;
pub mod traits;
pub mod types;

pub use error::*;
pub use stream::*;
pub use traits::*;
pub use types::*;
