//! Tests for the host block and inline parser.
//!
//! Trees are compared as inline `insta` snapshots of the dump format.

mod invariants;

use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::ast::NodeKind;
use crate::parsing::{ParsedDoc, parse_document};

fn parse(md: &str) -> ParsedDoc {
    let rope = Rope::from(md);
    let doc = parse_document(&rope);
    invariants::check(&rope, &doc.document);
    doc
}

#[test]
fn heading_then_paragraph() {
    let doc = parse("# Title #\n\nHello\nnext line\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Heading(1)
        Text "Title"
      Paragraph
        Text "Hello\n"
        Text "next line"
    "#);
}

#[test]
fn blank_line_is_recorded_on_next_block() {
    let doc = parse("one\n\ntwo\nthree\n");
    let d = &doc.document;
    let blocks: Vec<_> = d.children(d.root()).collect();
    assert_eq!(blocks.len(), 2);
    assert!(!d.has_blank_previous_lines(blocks[0]));
    assert!(d.has_blank_previous_lines(blocks[1]));
}

#[test]
fn heading_interrupts_paragraph() {
    let doc = parse("text\n## Head\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Paragraph
        Text "text"
      Heading(2)
        Text "Head"
    "#);
}

#[test]
fn list_inside_quote() {
    let doc = parse("> quote\n> - a\n>   b\n\nafter\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      BlockQuote
        Paragraph
          Text "quote"
        List(-, tight)
          ListItem
            Paragraph
              Text "a\n"
              Text "b"
      Paragraph
        Text "after"
    "#);
}

#[test]
fn blank_between_items_makes_list_loose() {
    let doc = parse("- a\n\n- b\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      List(-, loose)
        ListItem
          Paragraph
            Text "a"
        ListItem
          Paragraph
            Text "b"
    "#);
}

#[test]
fn ordered_list_keeps_start() {
    let doc = parse("3. three\n4. four\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      List(3., tight)
        ListItem
          Paragraph
            Text "three"
        ListItem
          Paragraph
            Text "four"
    "#);
}

#[test]
fn marker_change_starts_new_list() {
    let doc = parse("- a\n+ b\n");
    let d = &doc.document;
    let kinds: Vec<_> = d.children(d.root()).map(|c| d.kind(c)).collect();
    assert_eq!(kinds, [NodeKind::List, NodeKind::List]);
}

#[test]
fn lazy_continuation_line_joins_quoted_paragraph() {
    let doc = parse("> a\nb\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      BlockQuote
        Paragraph
          Text "a\n"
          Text "b"
    "#);
}

#[test]
fn fenced_code_in_quote() {
    let doc = parse("> ```rust\n> fn main() {}\n> ```\nafter\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      BlockQuote
        CodeBlock(rust) "fn main() {}\n"
      Paragraph
        Text "after"
    "#);
}

#[test]
fn unclosed_fence_runs_to_end() {
    let doc = parse("~~~\ncode\n\n# not a heading\n");
    insta::assert_snapshot!(doc.dump(), @r###"
    Document
      CodeBlock(fenced) "code\n\n# not a heading\n"
    "###);
}

#[test]
fn indented_code_drops_trailing_blank_lines() {
    let doc = parse("    code\n\n    more\n\ntext\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      CodeBlock(indented) "code\n\nmore\n"
      Paragraph
        Text "text"
    "#);
}

#[test]
fn indented_line_cannot_interrupt_paragraph() {
    let doc = parse("text\n    more\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Paragraph
        Text "text\n"
        Text "more"
    "#);
}

#[test]
fn thematic_break_wins_over_list() {
    let doc = parse("- - -\n***\n");
    insta::assert_snapshot!(doc.dump(), @r"
    Document
      ThematicBreak
      ThematicBreak
    ");
}

#[test]
fn definition_list() {
    let doc = parse("Apple\n: A fruit\n: A company\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      DefinitionList(tight)
        DefinitionTerm
          Text "Apple"
        DefinitionDescription
          Paragraph
            Text "A fruit"
        DefinitionDescription
          Paragraph
            Text "A company"
    "#);
}

#[test]
fn pipe_table() {
    let doc = parse("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Table
        TableRow(header)
          TableCell(left)
            Text "a"
          TableCell(right)
            Text "b"
        TableRow
          TableCell(left)
            Text "1"
          TableCell(right)
            Text "2"
    "#);
}

#[test]
fn code_span_is_a_raw_zone() {
    let doc = parse("use `{#id}` here\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Paragraph
        Text "use "
        CodeSpan "{#id}"
        Text " here"
    "#);
}

#[test]
fn empty_document() {
    let doc = parse("");
    assert_eq!(doc.dump(), "Document\n");
}

#[test]
fn blank_lines_only() {
    let doc = parse("\n\n\n");
    assert_eq!(doc.document.children(doc.document.root()).count(), 0);
}

#[test]
fn crlf_line_endings() {
    let doc = parse("# A\r\n\r\ntext\r\n");
    insta::assert_snapshot!(doc.dump(), @r#"
    Document
      Heading(1)
        Text "A"
      Paragraph
        Text "text"
    "#);
}
