/// A byte cursor over a string slice with absolute position tracking.
///
/// `base` is the rope offset of `s`, so `pos()` can be turned straight into
/// a [`Span`](crate::parsing::rope::Span). Callers that need to back off
/// clone the cursor and restore it.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Base offset in the rope (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Consumes `b` if it is next.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `pred` holds and returns the consumed slice.
    ///
    /// `pred` must accept either all or none of the bytes of a multi-byte
    /// character (e.g. by accepting every byte >= 0x80) so the slice stays on
    /// char boundaries.
    pub fn bump_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.s.get(start..self.i).unwrap_or("")
    }

    /// Skips spaces and tabs, returning how many bytes were skipped.
    pub fn skip_blanks(&mut self) -> usize {
        self.bump_while(|b| b == b' ' || b == b'\t').len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
        assert_eq!(cur.rest(), "ello");
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn eat_only_matching_byte() {
        let mut cur = Cursor::new("{a", 0);
        assert!(!cur.eat(b'a'));
        assert!(cur.eat(b'{'));
        assert!(cur.eat(b'a'));
        assert!(cur.eof());
    }

    #[test]
    fn bump_while_returns_consumed_slice() {
        let mut cur = Cursor::new("abc123 rest", 4);
        assert_eq!(cur.bump_while(|b| b.is_ascii_alphanumeric()), "abc123");
        assert_eq!(cur.skip_blanks(), 1);
        assert_eq!(cur.pos(), 11);
        assert_eq!(cur.rest(), "rest");
    }
}
