use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::reader::CODE_INDENT;
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};

/// Definition list container (PHP Markdown Extra style).
///
/// ```text
/// Term
/// : Description
/// ```
///
/// A `:` line directly after a paragraph turns each paragraph line into a
/// term. When the paragraph follows another definition list, the terms
/// extend that list instead of starting a new one.
pub struct DefinitionList;

impl DefinitionList {
    pub const MARKER: u8 = b':';

    /// `:` followed by at least one blank.
    fn at_marker(reader: &LineReader<'_>) -> bool {
        if reader.indent() >= CODE_INDENT {
            return false;
        }
        let rest = reader.rest().trim_start_matches([' ', '\t']).as_bytes();
        rest.first() == Some(&Self::MARKER) && matches!(rest.get(1), Some(b' ' | b'\t'))
    }

    /// Moves the lines of `para` into term nodes under a definition list and
    /// removes the paragraph. Returns the list.
    fn take_terms(doc: &mut Document, parent: NodeId, para: NodeId) -> NodeId {
        let blank = doc.has_blank_previous_lines(para);
        let lines = std::mem::take(&mut doc.node_mut(para).lines);

        let previous = doc
            .previous_sibling(para)
            .filter(|&prev| doc.kind(prev) == NodeKind::DefinitionList);
        let list = match previous {
            Some(list) => list,
            None => {
                let list = doc.new_node(
                    NodeKind::DefinitionList,
                    NodeData::DefinitionList { tight: true },
                );
                doc.insert_before(parent, para, list);
                doc.node_mut(list).blank_previous_lines = blank;
                list
            }
        };

        for (i, line) in lines.into_iter().enumerate() {
            let term = doc.new_node(NodeKind::DefinitionTerm, NodeData::None);
            let node = doc.node_mut(term);
            node.lines.push(line);
            node.blank_previous_lines = previous.is_some() && i == 0 && blank;
            doc.append_child(list, term);
        }
        doc.remove_child(parent, para);
        list
    }
}

impl BlockParser for DefinitionList {
    fn name(&self) -> &'static str {
        "definition_list"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(b":")
    }

    fn open(
        &self,
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        if doc.kind(parent) == NodeKind::DefinitionList || !Self::at_marker(reader) {
            return Open::NoMatch;
        }
        let Some(para) = doc
            .last_child(parent)
            .filter(|&last| doc.kind(last) == NodeKind::Paragraph)
        else {
            return Open::NoMatch;
        };
        let list = Self::take_terms(doc, parent, para);
        Open::Opened(list, State::Children)
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
    ) -> State {
        if reader.is_blank() || Self::at_marker(reader) {
            return State::Children;
        }
        if let Some(last) = doc.last_child(node)
            && let NodeData::DefinitionDescription { offset } = doc.node(last).data
            && reader.column() + reader.indent() >= offset
        {
            return State::Children;
        }
        State::Close
    }

    /// Loose when a blank line separates two entries or two blocks of one
    /// description.
    fn close(&self, doc: &mut Document, node: NodeId) {
        let loose = doc.children(node).skip(1).any(|c| doc.has_blank_previous_lines(c))
            || doc.children(node).any(|c| {
                doc.kind(c) == NodeKind::DefinitionDescription
                    && doc
                        .children(c)
                        .skip(1)
                        .any(|inner| doc.has_blank_previous_lines(inner))
            });
        if let NodeData::DefinitionList { tight } = &mut doc.node_mut(node).data {
            *tight = !loose;
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

/// One `: description` entry of a [`DefinitionList`].
pub struct DefinitionDescription;

impl BlockParser for DefinitionDescription {
    fn name(&self) -> &'static str {
        "definition_description"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(b":")
    }

    fn open(
        &self,
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        if doc.kind(parent) != NodeKind::DefinitionList || !DefinitionList::at_marker(reader) {
            return Open::NoMatch;
        }
        reader.skip_blanks();
        reader.advance(1);
        let padding = reader.indent();
        if padding > CODE_INDENT {
            reader.skip_indent(1);
        } else {
            reader.skip_indent(padding);
        }
        let offset = reader.column();
        let id = doc.new_node(
            NodeKind::DefinitionDescription,
            NodeData::DefinitionDescription { offset },
        );
        Open::Opened(id, State::Children)
    }

    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
    ) -> State {
        if reader.is_blank() {
            return State::Children;
        }
        let NodeData::DefinitionDescription { offset } = doc.node(node).data else {
            return State::Close;
        };
        let column = reader.column();
        if column + reader.indent() < offset {
            return State::Close;
        }
        reader.skip_indent(offset.saturating_sub(column));
        State::Children
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::rope::span::Span;

    #[test]
    fn marker_needs_a_following_blank() {
        assert!(DefinitionList::at_marker(&LineReader::new(": text", 0)));
        assert!(DefinitionList::at_marker(&LineReader::new("  :\ttext", 0)));
        assert!(!DefinitionList::at_marker(&LineReader::new(":text", 0)));
        assert!(!DefinitionList::at_marker(&LineReader::new(":", 0)));
    }

    #[test]
    fn paragraph_lines_become_terms() {
        let mut doc = Document::new();
        let root = doc.root();
        let para = doc.new_node(NodeKind::Paragraph, NodeData::None);
        doc.append_child(root, para);
        doc.node_mut(para).lines = vec![Span::new(0, 5), Span::new(6, 11)];
        doc.node_mut(para).blank_previous_lines = true;

        let cx = BlockContext {
            interrupting_paragraph: true,
        };
        let mut r = LineReader::new(": desc", 12);
        let Open::Opened(list, State::Children) = DefinitionList.open(&mut doc, root, &mut r, &cx)
        else {
            panic!("definition list should open");
        };

        assert_eq!(doc.parent(para), None);
        assert_eq!(doc.first_child(root), Some(list));
        assert!(doc.has_blank_previous_lines(list));
        let terms: Vec<_> = doc.children(list).collect();
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|&t| doc.kind(t) == NodeKind::DefinitionTerm));
        assert_eq!(doc.node(terms[1]).lines, [Span::new(6, 11)]);
        // the reader is left for the description parser
        assert_eq!(r.rest(), ": desc");
    }
}
