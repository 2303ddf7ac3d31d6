use crate::ast::{Document, Fence, FenceKind, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};

/// Fenced code block (```` ``` ```` or `~~~`).
///
/// Content lines keep their text verbatim apart from up to the opener's
/// indentation. The block ends at a closing fence of the same character
/// that is at least as long as the opener, or when its container closes.
pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    fn fence_char(kind: FenceKind) -> u8 {
        match kind {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }

    /// Parses an opening fence at the start of `s`, returning the fence
    /// kind, its length and the info string.
    pub fn opener(s: &str) -> Option<(FenceKind, usize, &str)> {
        let kind = match s.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let c = Self::fence_char(kind);
        let len = s.bytes().take_while(|&b| b == c).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = s[len..].trim();
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some((kind, len, info))
    }

    /// True when `s` (after indentation) closes `fence`.
    pub fn closes(fence: &Fence, s: &str) -> bool {
        let c = Self::fence_char(fence.kind);
        let len = s.bytes().take_while(|&b| b == c).count();
        len >= fence.len && s[len..].trim().is_empty()
    }
}

impl BlockParser for CodeFence {
    fn name(&self) -> &'static str {
        "fenced_code"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(b"`~")
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        let indent = reader.skip_blanks();
        let Some((kind, len, info)) = Self::opener(reader.rest()) else {
            return Open::NoMatch;
        };

        let fence = Fence { kind, len, indent };
        let info = (!info.is_empty()).then(|| info.to_string());
        reader.advance_to_end();
        let id = doc.new_node(
            NodeKind::CodeBlock,
            NodeData::CodeBlock {
                fence: Some(fence),
                info,
            },
        );
        Open::Opened(id, State::NoChildren)
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
    ) -> State {
        let NodeData::CodeBlock {
            fence: Some(fence), ..
        } = doc.node(node).data
        else {
            return State::Close;
        };

        if reader.indent() < 4 {
            let mut probe = reader.clone();
            probe.skip_blanks();
            if Self::closes(&fence, probe.rest()) {
                *reader = probe;
                reader.advance_to_end();
                return State::Finished;
            }
        }

        reader.skip_indent(fence.indent);
        let line = reader.rest_span();
        doc.node_mut(node).lines.push(line);
        reader.advance_to_end();
        State::NoChildren
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
