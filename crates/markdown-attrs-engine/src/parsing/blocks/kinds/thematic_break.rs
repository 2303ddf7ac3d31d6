use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};

/// Thematic break (`***`, `---`, `___`).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: &'static [u8] = b"-*_";

    /// Three or more of the same marker, optionally separated by blanks,
    /// and nothing else. Leading indentation is allowed.
    pub fn is_thematic_break(s: &str) -> bool {
        let mut marker = None;
        let mut count = 0;
        for b in s.bytes() {
            match b {
                b' ' | b'\t' => {}
                b if Self::MARKERS.contains(&b) => match marker {
                    None => {
                        marker = Some(b);
                        count = 1;
                    }
                    Some(m) if m == b => count += 1,
                    Some(_) => return false,
                },
                _ => return false,
            }
        }
        count >= 3
    }
}

impl BlockParser for ThematicBreak {
    fn name(&self) -> &'static str {
        "thematic_break"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(Self::MARKERS)
    }

    fn open(
        &self,
        doc: &mut Document,
        _parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        if !Self::is_thematic_break(reader.rest()) {
            return Open::NoMatch;
        }
        reader.advance_to_end();
        let id = doc.new_node(NodeKind::ThematicBreak, NodeData::None);
        Open::Opened(id, State::Finished)
    }

    fn continue_block(&self, _: &mut Document, _: NodeId, _: &mut LineReader<'_>) -> State {
        State::Close
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
