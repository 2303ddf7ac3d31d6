use crate::parsing::rope::span::Span;

/// Width of a tab stop when measuring indentation.
pub const TAB_STOP: usize = 4;

/// Indentation (in columns) from which a line counts as indented code.
pub const CODE_INDENT: usize = 4;

/// A cursor over one source line, as seen by block parsers.
///
/// Containers consume their prefixes (`> `, list item indentation) before
/// nested parsers see the line. Columns are tracked with tab stops of
/// [`TAB_STOP`]; when only part of a tab is consumed, the remaining columns
/// are kept as virtual spaces and still count as indentation.
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    text: &'a str,
    base: usize,
    pos: usize,
    col: usize,
    virtual_spaces: usize,
}

impl<'a> LineReader<'a> {
    /// `text` is the line without its line ending, `base` its rope offset.
    pub fn new(text: &'a str, base: usize) -> Self {
        Self {
            text,
            base,
            pos: 0,
            col: 0,
            virtual_spaces: 0,
        }
    }

    /// Unconsumed text of the line.
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Rope offset of the cursor.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Current column, counting consumed virtual spaces.
    pub fn column(&self) -> usize {
        self.col
    }

    /// Span of the unconsumed text.
    pub fn rest_span(&self) -> Span {
        Span::new(self.offset(), self.base + self.text.len())
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest().as_bytes().first().copied()
    }

    /// First byte after the indentation, `None` for a blank remainder.
    pub fn peek_nonblank(&self) -> Option<u8> {
        self.rest()
            .bytes()
            .find(|b| !matches!(b, b' ' | b'\t'))
    }

    /// True when only spaces and tabs remain.
    pub fn is_blank(&self) -> bool {
        self.peek_nonblank().is_none()
    }

    /// Columns of whitespace ahead of the cursor.
    pub fn indent(&self) -> usize {
        let start = self.col + self.virtual_spaces;
        let mut col = start;
        for b in self.rest().bytes() {
            match b {
                b' ' => col += 1,
                b'\t' => col += TAB_STOP - col % TAB_STOP,
                _ => break,
            }
        }
        col - self.col
    }

    /// Consumes up to `cols` columns of whitespace and returns how many were
    /// consumed. A tab wider than what is left is split.
    pub fn skip_indent(&mut self, cols: usize) -> usize {
        let mut remaining = cols;

        let owed = self.virtual_spaces.min(remaining);
        self.virtual_spaces -= owed;
        self.col += owed;
        remaining -= owed;

        while remaining > 0 {
            match self.peek() {
                Some(b' ') => {
                    self.pos += 1;
                    self.col += 1;
                    remaining -= 1;
                }
                Some(b'\t') => {
                    let width = TAB_STOP - (self.col + self.virtual_spaces) % TAB_STOP;
                    self.pos += 1;
                    if width <= remaining {
                        self.col += width;
                        remaining -= width;
                    } else {
                        self.col += remaining;
                        self.virtual_spaces = width - remaining;
                        remaining = 0;
                    }
                }
                _ => break,
            }
        }
        cols - remaining
    }

    /// Consumes all leading whitespace.
    pub fn skip_blanks(&mut self) -> usize {
        self.skip_indent(self.indent())
    }

    /// Consumes a single column of whitespace if there is one.
    pub fn skip_one_space(&mut self) -> bool {
        if self.virtual_spaces > 0 || matches!(self.peek(), Some(b' ' | b'\t')) {
            self.skip_indent(1) == 1
        } else {
            false
        }
    }

    /// Consumes `n` bytes of (ASCII) marker characters.
    ///
    /// Pending virtual spaces are dropped: markers are only consumed after
    /// the indentation in front of them.
    pub fn advance(&mut self, n: usize) {
        let n = n.min(self.text.len().saturating_sub(self.pos));
        self.virtual_spaces = 0;
        self.pos += n;
        self.col += n;
    }

    /// Consumes the rest of the line.
    pub fn advance_to_end(&mut self) {
        let n = self.text.len().saturating_sub(self.pos);
        self.advance(n);
    }
}
