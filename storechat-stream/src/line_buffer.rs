//! Per-invocation line accumulator.

/// Text received but not yet resolved into complete lines.
///
/// Lines are consumed from the front by advancing a read offset; consumed
/// text is compacted away on the next append. Each decode call owns its own
/// buffer.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: String,
    /// Byte offset of the first unconsumed character in `buf`.
    start: usize,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text.
    pub fn push_str(&mut self, text: &str) {
        self.compact();
        self.buf.push_str(text);
    }

    /// Remove and return the first complete line, without its `\n` and with
    /// one trailing `\r` stripped. `None` when no newline is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let pending = &self.buf[self.start..];
        let newline = pending.find('\n')?;
        let raw = &pending[..newline];
        let line = raw.strip_suffix('\r').unwrap_or(raw).to_string();
        self.start += newline + 1;
        Some(line)
    }

    /// Put `line` (plus a newline) back at the front of the buffer.
    pub fn unread_line(&mut self, line: &str) {
        self.compact();
        let mut restored = String::with_capacity(line.len() + 1 + self.buf.len());
        restored.push_str(line);
        restored.push('\n');
        restored.push_str(&self.buf);
        self.buf = restored;
    }

    /// Take everything not yet consumed, leaving the buffer empty.
    pub fn take_remainder(&mut self) -> String {
        self.compact();
        std::mem::take(&mut self.buf)
    }

    /// Drop all buffered text.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.start = 0;
    }

    /// Unconsumed text.
    pub fn as_str(&self) -> &str {
        &self.buf[self.start..]
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    fn compact(&mut self) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.start = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_complete_lines_only() {
        let mut buf = LineBuffer::new();
        buf.push_str("one\ntwo\nthr");
        assert_eq!(buf.next_line().as_deref(), Some("one"));
        assert_eq!(buf.next_line().as_deref(), Some("two"));
        assert_eq!(buf.next_line(), None);
        assert_eq!(buf.as_str(), "thr");
    }

    #[test]
    fn tail_is_completed_by_later_push() {
        let mut buf = LineBuffer::new();
        buf.push_str("data: {\"a\"");
        assert_eq!(buf.next_line(), None);
        buf.push_str(":1}\n");
        assert_eq!(buf.next_line().as_deref(), Some("data: {\"a\":1}"));
        assert!(buf.is_empty());
    }

    #[test]
    fn strips_single_carriage_return() {
        let mut buf = LineBuffer::new();
        buf.push_str("a\r\nb\r\r\n");
        assert_eq!(buf.next_line().as_deref(), Some("a"));
        assert_eq!(buf.next_line().as_deref(), Some("b\r"));
    }

    #[test]
    fn unread_line_goes_back_to_front() {
        let mut buf = LineBuffer::new();
        buf.push_str("first\nsecond\n");
        let line = buf.next_line().unwrap();
        buf.unread_line(&line);
        assert_eq!(buf.as_str(), "first\nsecond\n");
        assert_eq!(buf.next_line().as_deref(), Some("first"));
    }

    #[test]
    fn empty_lines_are_returned() {
        let mut buf = LineBuffer::new();
        buf.push_str("\n\nx\n");
        assert_eq!(buf.next_line().as_deref(), Some(""));
        assert_eq!(buf.next_line().as_deref(), Some(""));
        assert_eq!(buf.next_line().as_deref(), Some("x"));
    }

    #[test]
    fn take_remainder_empties_buffer() {
        let mut buf = LineBuffer::new();
        buf.push_str("done\nrest");
        buf.next_line();
        assert_eq!(buf.take_remainder(), "rest");
        assert!(buf.is_empty());
    }
}
