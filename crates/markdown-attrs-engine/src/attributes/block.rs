use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};
use crate::parsing::inline::cursor::Cursor;
use crate::parsing::rope::span::Span;

use super::syntax::{OPEN, parse_attributes};

/// Recognizes a line holding only an attribute block and turns it into an
/// `AttributeBlock` placeholder node.
///
/// Anything else after the closing `}` makes the line ordinary paragraph
/// text. Indented lines are never considered, so indented code keeps its
/// braces.
pub struct AttributeBlockParser;

impl BlockParser for AttributeBlockParser {
    fn name(&self) -> &'static str {
        "attribute_block"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(&[OPEN])
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        reader.skip_blanks();
        let start = reader.offset();
        let mut cur = Cursor::new(reader.rest(), start);
        let Some(attrs) = parse_attributes(&mut cur) else {
            return Open::RequireParagraph;
        };
        if !cur.rest().trim_matches([' ', '\t']).is_empty() {
            return Open::RequireParagraph;
        }

        let id = doc.new_node(NodeKind::AttributeBlock, NodeData::None);
        let node = doc.node_mut(id);
        node.attributes = attrs;
        node.lines.push(Span::new(start, cur.pos()));
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
