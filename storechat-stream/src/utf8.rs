//! Stateful UTF-8 decoding across chunk boundaries.

/// Incremental UTF-8 decoder.
///
/// A multi-byte sequence cut by a chunk boundary is held back until the next
/// chunk completes it. Invalid sequences decode to U+FFFD. A byte-order mark
/// at the very start of the input is dropped.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete trailing sequence (at most 3).
    pending: Vec<u8>,
    /// At least one character has been produced.
    started: bool,
}

impl Utf8Decoder {
    /// Create a decoder with no pending bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, appending complete characters to `out`.
    pub fn decode(&mut self, chunk: &[u8], out: &mut String) {
        let start = out.len();
        if self.pending.is_empty() {
            self.decode_from(chunk, out);
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            self.decode_from(&joined, out);
        }
        self.strip_bom(out, start);
    }

    /// End of input: an incomplete trailing sequence becomes U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(char::REPLACEMENT_CHARACTER);
            self.started = true;
        }
    }

    /// Number of bytes waiting for the rest of their sequence.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop a leading U+FEFF from the first characters written at `start`.
    fn strip_bom(&mut self, out: &mut String, start: usize) {
        if self.started || out.len() == start {
            return;
        }
        self.started = true;
        if out[start..].starts_with('\u{FEFF}') {
            out.replace_range(start..start + '\u{FEFF}'.len_utf8(), "");
        }
    }

    fn decode_from(&mut self, mut input: &[u8], out: &mut String) {
        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    return;
                }
                Err(e) => {
                    let (valid, rest) = input.split_at(e.valid_up_to());
                    if let Ok(valid) = std::str::from_utf8(valid) {
                        out.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        None => {
                            self.pending.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }
}
