//! Incremental decoder for streamed chat replies.
//!
//! The chat function answers with a chunked body of newline-delimited,
//! `data: `-prefixed frames, each carrying a JSON object whose
//! `choices[0].delta.content` holds the next fragment of assistant text.
//! The logical end is the payload `[DONE]`, which may arrive before the body
//! physically closes.
//!
//! ```text
//! data: {"choices":[{"delta":{"content":"We ship"}}]}
//!
//! data: {"choices":[{"delta":{"content":" worldwide."}}]}
//!
//! data: [DONE]
//! ```
//!
//! # Usage
//!
//! ```
//! use futures::stream;
//! use storechat_types::ChatEvent;
//!
//! # futures::executor::block_on(async {
//! let body = stream::iter(vec![
//!     Ok::<_, std::convert::Infallible>(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n".to_vec()),
//!     Ok(b"data: [DONE]\n".to_vec()),
//! ]);
//! let mut events: Vec<ChatEvent> = Vec::new();
//! storechat_stream::decode(body, &mut events).await;
//! assert_eq!(events, vec![ChatEvent::Delta("Hi".into()), ChatEvent::Done]);
//! # });
//! ```
//!
//! Every call owns its own buffers; concurrent decodes never share state.

pub mod decoder;
pub mod frame;
pub mod line_buffer;
pub mod utf8;

pub use decoder::{FrameDecoder, decode, decode_cancellable, decode_stream};
pub use frame::{DATA_PREFIX, DONE_SENTINEL, Frame, extract_delta, parse_line};
pub use line_buffer::LineBuffer;
pub use utf8::Utf8Decoder;
