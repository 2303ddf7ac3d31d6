use crate::parsing::rope::span::Span;

use super::{cursor::Cursor, kinds::CodeSpan, types::InlineNode};

/// Parses one line of inline content into a sequence of [`InlineNode`]s.
///
/// # Arguments
/// - `base`: Byte offset in the rope where `s` begins (for absolute span positions)
/// - `s`: The text of the line, without its line ending
///
/// Text between special constructs is emitted as `InlineNode::Text`, so the
/// returned spans cover the whole input.
pub fn parse_inline(base: usize, s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        if let Some(node) = try_parse_code_span(&mut cur) {
            let sp = node.span();
            flush_text(&mut out, text_start, sp.start);
            text_start = sp.end;
            out.push(node);
            continue;
        }
        // Skip a whole backtick run so an unmatched opener is not retried
        // from its second tick.
        if cur.peek() == Some(CodeSpan::TICK) {
            cur.bump_while(|b| b == CodeSpan::TICK);
        } else {
            cur.bump();
        }
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// Attempts to parse a code span starting at the current position.
///
/// The closing run must have the same number of backticks as the opening
/// run. On failure the cursor is restored and `None` returned.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    let open_len = cur.bump_while(|b| b == CodeSpan::TICK).len();
    let inner_start = cur.pos();

    while !cur.eof() {
        if cur.peek() == Some(CodeSpan::TICK) {
            let inner_end = cur.pos();
            let close_len = cur.bump_while(|b| b == CodeSpan::TICK).len();
            if close_len == open_len {
                return Some(InlineNode::CodeSpan {
                    full: Span {
                        start,
                        end: cur.pos(),
                    },
                    inner: Span {
                        start: inner_start,
                        end: inner_end,
                    },
                });
            }
        } else {
            cur.bump();
        }
    }

    *cur = saved;
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_text() {
        let nodes = parse_inline(0, "hello world");
        assert_eq!(nodes, [InlineNode::Text(Span::new(0, 11))]);
    }

    #[test]
    fn parse_code_span_with_base_offset() {
        let nodes = parse_inline(10, "a `code` b");
        assert_eq!(
            nodes,
            [
                InlineNode::Text(Span::new(10, 12)),
                InlineNode::CodeSpan {
                    full: Span::new(12, 18),
                    inner: Span::new(13, 17),
                },
                InlineNode::Text(Span::new(18, 20)),
            ]
        );
    }

    #[test]
    fn double_backticks_may_contain_single() {
        let nodes = parse_inline(0, "``a ` b``");
        assert_eq!(
            nodes,
            [InlineNode::CodeSpan {
                full: Span::new(0, 9),
                inner: Span::new(2, 7),
            }]
        );
    }

    #[test]
    fn unclosed_code_span_becomes_text() {
        let nodes = parse_inline(0, "`unclosed code");
        assert_eq!(nodes, [InlineNode::Text(Span::new(0, 14))]);
    }

    #[test]
    fn braces_are_plain_text() {
        let nodes = parse_inline(0, "{#id .c}");
        assert_eq!(nodes, [InlineNode::Text(Span::new(0, 8))]);
    }
}
