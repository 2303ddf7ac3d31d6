use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};
use crate::parsing::rope::span::Span;

/// ATX heading (`# Title`, up to six `#`).
///
/// An optional closing sequence of `#` is stripped when it is separated
/// from the content by a blank.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns the heading level and the byte range of the content within
    /// `s`, which must start at the first `#`.
    pub fn parse(s: &str) -> Option<(u8, usize, usize)> {
        let b = s.as_bytes();
        let level = b.iter().take_while(|&&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        if !matches!(b.get(level), None | Some(b' ' | b'\t')) {
            return None;
        }

        let mut start = level;
        while matches!(b.get(start), Some(b' ' | b'\t')) {
            start += 1;
        }
        let mut end = b.len();
        while end > start && matches!(b[end - 1], b' ' | b'\t') {
            end -= 1;
        }

        // Closing sequence
        let mut hashes = end;
        while hashes > start && b[hashes - 1] == Self::MARKER {
            hashes -= 1;
        }
        if hashes < end && (hashes == start || matches!(b[hashes - 1], b' ' | b'\t')) {
            end = hashes;
            while end > start && matches!(b[end - 1], b' ' | b'\t') {
                end -= 1;
            }
        }

        // level is at most 6
        Some((level as u8, start, end))
    }
}

impl BlockParser for AtxHeading {
    fn name(&self) -> &'static str {
        "atx_heading"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(b"#")
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        reader.skip_blanks();
        let Some((level, start, end)) = Self::parse(reader.rest()) else {
            return Open::NoMatch;
        };

        let base = reader.offset();
        let id = doc.new_node(NodeKind::Heading, NodeData::Heading { level });
        if end > start {
            doc.node_mut(id)
                .lines
                .push(Span::new(base + start, base + end));
        }
        reader.advance_to_end();
        Open::Opened(id, State::Finished)
    }

    fn continue_block(&self, _: &mut Document, _: NodeId, _: &mut LineReader<'_>) -> State {
        State::Close
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
