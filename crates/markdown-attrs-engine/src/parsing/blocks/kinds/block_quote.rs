use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::reader::CODE_INDENT;
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};

/// Blockquote container with owned delimiter constant.
///
/// Each line of the quote starts with `>` and one optional blank; nested
/// quotes are nested containers, one `>` per level. A paragraph inside a
/// quote also continues over lazy lines without the prefix.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Consumes one `>` prefix (and the blank after it) if present.
    fn eat_prefix(reader: &mut LineReader<'_>) -> bool {
        if reader.indent() >= CODE_INDENT || reader.peek_nonblank() != Some(Self::PREFIX) {
            return false;
        }
        reader.skip_blanks();
        reader.advance(1);
        reader.skip_one_space();
        true
    }
}

impl BlockParser for BlockQuote {
    fn name(&self) -> &'static str {
        "block_quote"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(b">")
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        if !Self::eat_prefix(reader) {
            return Open::NoMatch;
        }
        let id = doc.new_node(NodeKind::BlockQuote, NodeData::None);
        Open::Opened(id, State::Children)
    }

    fn continue_block(&self, _: &mut Document, _: NodeId, reader: &mut LineReader<'_>) -> State {
        if Self::eat_prefix(reader) {
            State::Children
        } else {
            State::Close
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
