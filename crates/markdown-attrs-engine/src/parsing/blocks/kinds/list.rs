use crate::ast::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::blocks::reader::CODE_INDENT;
use crate::parsing::blocks::{BlockContext, BlockParser, LineReader, Open, State};

use super::ThematicBreak;

/// A list item marker (`-`, `+`, `*`, `1.`, `1)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    /// Bullet character, or the `.`/`)` delimiter of an ordered marker.
    pub marker: u8,
    pub ordered: bool,
    pub start: u32,
    /// Bytes taken by the marker.
    pub width: usize,
}

impl ListMarker {
    pub const BULLETS: &'static [u8] = b"-+*";
    pub const TRIGGERS: &'static [u8] = b"-+*0123456789";
    const MAX_DIGITS: usize = 9;

    /// Parses a marker at the start of `s`. The marker must be followed by
    /// a blank or the end of the line.
    pub fn parse(s: &str) -> Option<ListMarker> {
        let b = s.as_bytes();
        let first = *b.first()?;

        let marker = if Self::BULLETS.contains(&first) {
            ListMarker {
                marker: first,
                ordered: false,
                start: 1,
                width: 1,
            }
        } else {
            let digits = b.iter().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 || digits > Self::MAX_DIGITS {
                return None;
            }
            let delim = *b.get(digits)?;
            if delim != b'.' && delim != b')' {
                return None;
            }
            ListMarker {
                marker: delim,
                ordered: true,
                start: s[..digits].parse().ok()?,
                width: digits + 1,
            }
        };

        match b.get(marker.width) {
            None | Some(b' ' | b'\t') => Some(marker),
            _ => None,
        }
    }

    /// True when this marker can continue a list started with `list_marker`.
    pub fn same_type(&self, list_marker: u8, ordered: bool) -> bool {
        self.marker == list_marker && self.ordered == ordered
    }
}

/// Reads the marker at the reader's position after indentation, rejecting
/// thematic breaks such as `- - -`.
fn peek_marker(reader: &LineReader<'_>) -> Option<ListMarker> {
    if reader.indent() >= CODE_INDENT {
        return None;
    }
    let rest = reader.rest().trim_start_matches([' ', '\t']);
    if ThematicBreak::is_thematic_break(rest) {
        return None;
    }
    ListMarker::parse(rest)
}

fn list_data(doc: &Document, list: NodeId) -> Option<(u8, bool)> {
    match doc.node(list).data {
        NodeData::List {
            marker, ordered, ..
        } => Some((marker, ordered)),
        _ => None,
    }
}

fn item_offset(doc: &Document, item: NodeId) -> usize {
    match doc.node(item).data {
        NodeData::ListItem { offset } => offset,
        _ => 0,
    }
}

/// List container. Opens when a marker appears outside an existing list;
/// the items themselves are opened by [`ListItem`] on the same line.
pub struct List;

impl BlockParser for List {
    fn name(&self) -> &'static str {
        "list"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(ListMarker::TRIGGERS)
    }

    fn open(
        &self,
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        cx: &BlockContext,
    ) -> Open {
        if doc.kind(parent) == NodeKind::List {
            return Open::NoMatch;
        }
        let Some(m) = peek_marker(reader) else {
            return Open::NoMatch;
        };

        if cx.interrupting_paragraph {
            let mut probe = reader.clone();
            probe.skip_blanks();
            probe.advance(m.width);
            if probe.is_blank() || (m.ordered && m.start != 1) {
                return Open::NoMatch;
            }
        }

        let id = doc.new_node(
            NodeKind::List,
            NodeData::List {
                marker: m.marker,
                ordered: m.ordered,
                start: m.start,
                tight: true,
            },
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
        if let Some(last) = doc.last_child(node)
            && reader.column() + reader.indent() >= item_offset(doc, last)
        {
            return State::Children;
        }
        match (peek_marker(reader), list_data(doc, node)) {
            (Some(m), Some((marker, ordered))) if m.same_type(marker, ordered) => State::Children,
            _ => State::Close,
        }
    }

    /// A list is loose when a blank line separates two of its items or two
    /// blocks directly inside one item.
    fn close(&self, doc: &mut Document, node: NodeId) {
        let items: Vec<NodeId> = doc.children(node).collect();
        let loose = items.iter().enumerate().any(|(i, &item)| {
            (i > 0 && doc.has_blank_previous_lines(item))
                || doc
                    .children(item)
                    .skip(1)
                    .any(|child| doc.has_blank_previous_lines(child))
        });
        if let NodeData::List { tight, .. } = &mut doc.node_mut(node).data {
            *tight = !loose;
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

/// List item container. Only opens directly inside a [`List`] whose marker
/// type it matches; its content column is recorded as the item offset.
pub struct ListItem;

impl BlockParser for ListItem {
    fn name(&self) -> &'static str {
        "list_item"
    }

    fn triggers(&self) -> Option<&'static [u8]> {
        Some(ListMarker::TRIGGERS)
    }

    fn open(
        &self,
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        _cx: &BlockContext,
    ) -> Open {
        let Some((marker, ordered)) = list_data(doc, parent) else {
            return Open::NoMatch;
        };
        let Some(m) = peek_marker(reader) else {
            return Open::NoMatch;
        };
        if !m.same_type(marker, ordered) {
            return Open::NoMatch;
        }

        reader.skip_blanks();
        reader.advance(m.width);
        let offset = if reader.is_blank() {
            reader.column() + 1
        } else {
            let padding = reader.indent();
            // Five or more blanks: content is indented code one column in.
            if padding > CODE_INDENT {
                reader.skip_indent(1);
            } else {
                reader.skip_indent(padding);
            }
            reader.column()
        };

        let id = doc.new_node(NodeKind::ListItem, NodeData::ListItem { offset });
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
        let offset = item_offset(doc, node);
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
    use rstest::rstest;

    #[rstest]
    #[case("- item", Some((b'-', false, 1, 1)))]
    #[case("*", Some((b'*', false, 1, 1)))]
    #[case("1. one", Some((b'.', true, 1, 2)))]
    #[case("42) answer", Some((b')', true, 42, 3)))]
    #[case("-item", None)]
    #[case("1.5", None)]
    #[case("1234567890. too long", None)]
    #[case("a. letter", None)]
    fn parses_markers(#[case] input: &str, #[case] expected: Option<(u8, bool, u32, usize)>) {
        let got = ListMarker::parse(input).map(|m| (m.marker, m.ordered, m.start, m.width));
        assert_eq!(got, expected);
    }

    #[test]
    fn thematic_break_is_not_a_marker() {
        assert_eq!(peek_marker(&LineReader::new("- - -", 0)), None);
        assert!(peek_marker(&LineReader::new(" - a", 0)).is_some());
    }

    #[test]
    fn item_offset_follows_marker_padding() {
        let mut doc = Document::new();
        let root = doc.root();
        let cx = BlockContext::default();

        let mut r = LineReader::new("-   text", 0);
        let Open::Opened(list, _) = List.open(&mut doc, root, &mut r, &cx) else {
            panic!("list should open");
        };
        doc.append_child(root, list);
        let Open::Opened(item, _) = ListItem.open(&mut doc, list, &mut r, &cx) else {
            panic!("item should open");
        };

        assert_eq!(doc.node(item).data, NodeData::ListItem { offset: 4 });
        assert_eq!(r.rest(), "text");
    }

    #[test]
    fn empty_item_cannot_interrupt_a_paragraph() {
        let mut doc = Document::new();
        let root = doc.root();
        let cx = BlockContext {
            interrupting_paragraph: true,
        };
        assert_eq!(
            List.open(&mut doc, root, &mut LineReader::new("-", 0), &cx),
            Open::NoMatch
        );
        assert_eq!(
            List.open(&mut doc, root, &mut LineReader::new("2. two", 0), &cx),
            Open::NoMatch
        );
    }
}
