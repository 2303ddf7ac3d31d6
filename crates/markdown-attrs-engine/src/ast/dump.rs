use std::fmt::Write;

use xi_rope::Rope;

use super::{Document, NodeData, NodeId, NodeKind};
use crate::parsing::rope::slice::slice_to_string;

/// Renders the tree as an indented outline, one node per line.
///
/// Attributes are listed in insertion order with HTML-escaped values:
///
/// ```text
/// Document
///   Paragraph {id="intro" class="lead"}
///     Text "Hello"
/// ```
pub fn dump(doc: &Document, source: &Rope) -> String {
    let mut out = String::new();
    dump_node(doc, source, doc.root(), 0, &mut out);
    out
}

fn dump_node(doc: &Document, source: &Rope, id: NodeId, depth: usize, out: &mut String) {
    let node = doc.node(id);
    out.push_str(&"  ".repeat(depth));
    out.push_str(&label(doc, source, id));

    if !node.attributes.is_empty() {
        let attrs: Vec<String> = node
            .attributes
            .iter()
            .map(|a| {
                format!(
                    "{}=\"{}\"",
                    a.name,
                    html_escape::encode_double_quoted_attribute(&a.value)
                )
            })
            .collect();
        let _ = write!(out, " {{{}}}", attrs.join(" "));
    }
    out.push('\n');

    for child in doc.children(id) {
        dump_node(doc, source, child, depth + 1, out);
    }
}

fn label(doc: &Document, source: &Rope, id: NodeId) -> String {
    let node = doc.node(id);
    match (&node.kind, &node.data) {
        (NodeKind::Heading, NodeData::Heading { level }) => format!("Heading({level})"),
        (NodeKind::CodeBlock, NodeData::CodeBlock { fence, info }) => {
            let body: String = node
                .lines
                .iter()
                .map(|sp| slice_to_string(source, *sp) + "\n")
                .collect();
            match (fence, info) {
                (_, Some(info)) => format!("CodeBlock({info}) {body:?}"),
                (Some(_), None) => format!("CodeBlock(fenced) {body:?}"),
                (None, None) => format!("CodeBlock(indented) {body:?}"),
            }
        }
        (
            NodeKind::List,
            NodeData::List {
                marker,
                ordered,
                start,
                tight,
            },
        ) => {
            let spacing = if *tight { "tight" } else { "loose" };
            if *ordered {
                format!("List({start}{}, {spacing})", char::from(*marker))
            } else {
                format!("List({}, {spacing})", char::from(*marker))
            }
        }
        (NodeKind::DefinitionList, NodeData::DefinitionList { tight }) => {
            format!("DefinitionList({})", if *tight { "tight" } else { "loose" })
        }
        (NodeKind::TableRow, NodeData::TableRow { header: true }) => "TableRow(header)".into(),
        (NodeKind::TableCell, NodeData::TableCell { align, .. }) => match align.as_str() {
            Some(align) => format!("TableCell({align})"),
            None => "TableCell".into(),
        },
        (NodeKind::Text, NodeData::Text { soft_break }) => {
            let mut text: String = node
                .lines
                .iter()
                .map(|sp| slice_to_string(source, *sp))
                .collect();
            if *soft_break {
                text.push('\n');
            }
            format!("Text {text:?}")
        }
        (NodeKind::CodeSpan, _) => {
            let text: String = node
                .lines
                .iter()
                .map(|sp| slice_to_string(source, *sp))
                .collect();
            format!("CodeSpan {text:?}")
        }
        (kind, _) => format!("{kind:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Attributes;

    #[test]
    fn dump_lists_attributes_escaped_in_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.new_node(NodeKind::Paragraph, NodeData::None);
        doc.append_child(root, p);
        *doc.attributes_mut(p) = [("id", "x"), ("title", "a \"b\" & c")]
            .into_iter()
            .collect::<Attributes>();

        let out = dump(&doc, &Rope::from(""));
        assert_eq!(
            out,
            "Document\n  Paragraph {id=\"x\" title=\"a &quot;b&quot; &amp; c\"}\n"
        );
    }
}
