//! # Inline Parsing
//!
//! Cursor-based inline parsing, run once over the finished block tree.
//!
//! Every block whose kind has inline content (paragraphs, headings,
//! definition terms, table cells) gets `Text` and `CodeSpan` children built
//! from its content lines. Code spans are raw zones: nothing is parsed inside
//! them.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, CodeSpan)
//! - **`kinds`**: Inline types with owned delimiters (CodeSpan)
//! - **`cursor`**: `Cursor` for byte-by-byte parsing with position tracking
//! - **`parser`**: `parse_inline()` for a single line

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineNode;

use xi_rope::Rope;

use crate::ast::{Document, NodeData, NodeKind, WalkStatus, walk};
use crate::parsing::rope::{slice::slice_to_string, span::Span};

/// Builds inline children for every inline-bearing block in `doc`.
pub fn attach_inlines(doc: &mut Document, rope: &Rope) {
    let mut targets = vec![];
    walk(doc, doc.root(), &mut |id, entering| {
        if entering && doc.kind(id).has_inline_content() {
            targets.push(id);
            return WalkStatus::SkipChildren;
        }
        WalkStatus::Continue
    });

    for block in targets {
        let lines = doc.node(block).lines.clone();
        let last = lines.len().saturating_sub(1);

        for (i, line) in lines.into_iter().enumerate() {
            let text = slice_to_string(rope, line);
            let trimmed = text.trim_end_matches([' ', '\t']);
            let mut line_nodes = parse_inline(line.start, trimmed);
            let soft_break = i < last;

            // A line ending in a code span still needs somewhere to carry
            // its line break.
            if soft_break && !matches!(line_nodes.last(), Some(InlineNode::Text(_))) {
                let end = line.start + trimmed.len();
                line_nodes.push(InlineNode::Text(Span::new(end, end)));
            }

            let count = line_nodes.len();
            for (j, node) in line_nodes.into_iter().enumerate() {
                let child = match node {
                    InlineNode::Text(sp) => {
                        let id = doc.new_node(
                            NodeKind::Text,
                            NodeData::Text {
                                soft_break: soft_break && j + 1 == count,
                            },
                        );
                        doc.node_mut(id).lines.push(sp);
                        id
                    }
                    InlineNode::CodeSpan { inner, .. } => {
                        let id = doc.new_node(NodeKind::CodeSpan, NodeData::None);
                        doc.node_mut(id).lines.push(inner);
                        id
                    }
                };
                doc.append_child(block, child);
            }
        }
    }
}
