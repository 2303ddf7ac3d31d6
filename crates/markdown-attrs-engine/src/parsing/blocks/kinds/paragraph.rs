use xi_rope::Rope;

use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::LineReader;

use super::Table;

/// Paragraph block type.
///
/// Paragraphs have no delimiters: they are the default leaf block when no
/// other block opener matches, and they are opened and extended by the
/// builder itself rather than through a parser. Each content line is stored
/// without its leading indentation.
pub struct Paragraph;

impl Paragraph {
    /// Opens a paragraph under `parent` holding the rest of the line.
    pub fn open(
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        blank_previous: bool,
    ) -> NodeId {
        let id = doc.new_node(NodeKind::Paragraph, NodeData::None);
        doc.append_child(parent, id);
        doc.node_mut(id).blank_previous_lines = blank_previous;
        Self::extend(doc, id, reader);
        id
    }

    /// Appends the rest of the line as a continuation line.
    pub fn extend(doc: &mut Document, id: NodeId, reader: &mut LineReader<'_>) {
        reader.skip_blanks();
        doc.node_mut(id).lines.push(reader.rest_span());
        reader.advance_to_end();
    }

    /// Finalizes a paragraph. A paragraph that was taken apart while open
    /// (definition terms) is detached and left alone.
    pub fn close(doc: &mut Document, rope: &Rope, id: NodeId) {
        if doc.parent(id).is_none() {
            return;
        }
        Table::try_convert(doc, rope, id);
    }
}
