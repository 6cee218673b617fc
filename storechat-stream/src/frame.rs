//! Line classification and delta extraction.
//!
//! The wire format is newline-delimited, `data: `-prefixed frames:
//! ```text
//! data: {"choices":[{"delta":{"content":"Hello"}}]}
//!
//! : keep-alive
//! data: {"choices":[{"delta":{"content":" world"}}]}
//!
//! data: [DONE]
//! ```

use serde_json::Value;

/// Prefix of a data line. The space is part of the prefix.
pub const DATA_PREFIX: &str = "data: ";

/// Payload marking the logical end of the reply.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One line of the event stream, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// Blank line, `:` comment/heartbeat, a non-data field, or an empty payload.
    Ignored,
    /// The `[DONE]` sentinel.
    Done,
    /// A trimmed payload that should hold a JSON object.
    Data(&'a str),
}

/// Classify one line (already stripped of its `\n` and trailing `\r`).
pub fn parse_line(line: &str) -> Frame<'_> {
    if line.trim().is_empty() || line.starts_with(':') {
        return Frame::Ignored;
    }
    let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Ignored;
    };
    match rest.trim() {
        "" => Frame::Ignored,
        DONE_SENTINEL => Frame::Done,
        payload => Frame::Data(payload),
    }
}

/// Text fragment at `choices[0].delta.content`, if present and non-empty.
///
/// Any missing or mistyped step means the frame carries no text.
pub fn extract_delta(payload: &Value) -> Option<&str> {
    let Value::Object(root) = payload else {
        return None;
    };
    let Some(Value::Array(choices)) = root.get("choices") else {
        return None;
    };
    let Some(Value::Object(choice)) = choices.first() else {
        return None;
    };
    let Some(Value::Object(delta)) = choice.get("delta") else {
        return None;
    };
    let Some(Value::String(content)) = delta.get("content") else {
        return None;
    };
    if content.is_empty() {
        None
    } else {
        Some(content.as_str())
    }
}
