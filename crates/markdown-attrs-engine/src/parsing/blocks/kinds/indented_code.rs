use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::reader::CODE_INDENT;
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};
use crate::parsing::rope::span::Span;

/// Indented code block: lines indented by four or more columns.
///
/// Blank lines inside the block are kept; trailing ones are dropped when it
/// closes. Cannot interrupt a paragraph.
pub struct IndentedCode;

impl IndentedCode {
    fn push_line(doc: &mut Document, node: NodeId, reader: &mut LineReader<'_>) {
        let line = if reader.is_blank() {
            Span::new(reader.offset(), reader.offset())
        } else {
            reader.skip_indent(CODE_INDENT);
            reader.rest_span()
        };
        doc.node_mut(node).lines.push(line);
        reader.advance_to_end();
    }
}

impl BlockParser for IndentedCode {
    fn name(&self) -> &'static str {
        "indented_code"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        None
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        if reader.is_blank() || reader.indent() < CODE_INDENT {
            return Open::NoMatch;
        }
        let id = doc.new_node(
            NodeKind::CodeBlock,
            NodeData::CodeBlock {
                fence: None,
                info: None,
            },
        );
        Self::push_line(doc, id, reader);
        Open::Opened(id, State::NoChildren)
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
    ) -> State {
        if !reader.is_blank() && reader.indent() < CODE_INDENT {
            return State::Close;
        }
        Self::push_line(doc, node, reader);
        State::NoChildren
    }

    fn close(&self, doc: &mut Document, node: NodeId) {
        let lines = &mut doc.node_mut(node).lines;
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        false
    }

    fn can_accept_indented_line(&self) -> bool {
        true
    }
}
