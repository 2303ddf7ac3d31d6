use crate::ast::{NodeData, NodeId, NodeKind, WalkStatus};

use super::{HtmlWriter, RenderFn};

pub fn core_handlers() -> [(NodeKind, RenderFn); 16] {
    [
        (NodeKind::Document, render_document),
        (NodeKind::Paragraph, render_paragraph),
        (NodeKind::Heading, render_heading),
        (NodeKind::ThematicBreak, render_thematic_break),
        (NodeKind::CodeBlock, render_code_block),
        (NodeKind::BlockQuote, render_block_quote),
        (NodeKind::List, render_list),
        (NodeKind::ListItem, render_list_item),
        (NodeKind::Table, render_table),
        (NodeKind::TableRow, render_table_row),
        (NodeKind::TableCell, render_table_cell),
        (NodeKind::DefinitionList, render_definition_list),
        (NodeKind::DefinitionTerm, render_definition_term),
        (NodeKind::DefinitionDescription, render_definition_description),
        (NodeKind::Text, render_text),
        (NodeKind::CodeSpan, render_code_span),
    ]
}

/// A paragraph written without `<p>`: directly inside an item of a tight
/// list (or description of a tight definition list) and without attributes.
fn is_bare_paragraph(w: &HtmlWriter<'_>, id: NodeId) -> bool {
    let doc = w.doc();
    if doc.kind(id) != NodeKind::Paragraph || !doc.attributes(id).is_empty() {
        return false;
    }
    let Some(parent) = doc.parent(id) else {
        return false;
    };
    let Some(grandparent) = doc.parent(parent) else {
        return false;
    };
    match (doc.kind(parent), &doc.node(grandparent).data) {
        (NodeKind::ListItem, NodeData::List { tight, .. }) => *tight,
        (NodeKind::DefinitionDescription, NodeData::DefinitionList { tight }) => *tight,
        _ => false,
    }
}

/// Opens a container whose first child may be a bare paragraph.
fn open_item(w: &mut HtmlWriter<'_>, tag: &str, id: NodeId) {
    w.open_tag(tag, id);
    let bare_first = w
        .doc()
        .first_child(id)
        .is_some_and(|first| is_bare_paragraph(w, first));
    if !bare_first {
        w.write("\n");
    }
}

fn render_document(_: &mut HtmlWriter<'_>, _: NodeId, _: bool) -> WalkStatus {
    WalkStatus::Continue
}

fn render_paragraph(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if is_bare_paragraph(w, id) {
        if !entering && w.doc().next_sibling(id).is_some() {
            w.write("\n");
        }
        return WalkStatus::Continue;
    }
    if entering {
        w.open_tag("p", id);
    } else {
        w.write("</p>\n");
    }
    WalkStatus::Continue
}

fn render_heading(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    let level = match w.doc().node(id).data {
        NodeData::Heading { level } => level,
        _ => 1,
    };
    if entering {
        w.open_tag(&format!("h{level}"), id);
    } else {
        w.write(&format!("</h{level}>\n"));
    }
    WalkStatus::Continue
}

fn render_thematic_break(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        w.open_tag("hr", id);
        w.write("\n");
    }
    WalkStatus::SkipChildren
}

fn render_code_block(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if !entering {
        return WalkStatus::Continue;
    }
    w.open_tag("pre", id);
    let language = match &w.doc().node(id).data {
        NodeData::CodeBlock {
            info: Some(info), ..
        } => info.split_whitespace().next().map(str::to_string),
        _ => None,
    };
    match language {
        Some(lang) => {
            w.write("<code class=\"language-");
            w.write(&html_escape::encode_double_quoted_attribute(&lang));
            w.write("\">");
        }
        None => w.write("<code>"),
    }
    let lines: Vec<String> = w.lines(id).collect();
    for line in lines {
        w.write_escaped(&line);
        w.write("\n");
    }
    w.write("</code></pre>\n");
    WalkStatus::SkipChildren
}

fn render_block_quote(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        w.open_tag("blockquote", id);
        w.write("\n");
    } else {
        w.write("</blockquote>\n");
    }
    WalkStatus::Continue
}

fn render_list(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    let (ordered, start) = match w.doc().node(id).data {
        NodeData::List { ordered, start, .. } => (ordered, start),
        _ => (false, 1),
    };
    let tag = if ordered { "ol" } else { "ul" };
    if entering {
        w.write("<");
        w.write(tag);
        if ordered && start != 1 {
            w.write(&format!(" start=\"{start}\""));
        }
        w.write_attributes(id);
        w.write(">\n");
    } else {
        w.write(&format!("</{tag}>\n"));
    }
    WalkStatus::Continue
}

fn render_list_item(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        open_item(w, "li", id);
    } else {
        w.write("</li>\n");
    }
    WalkStatus::Continue
}

fn render_table(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        w.open_tag("table", id);
        w.write("\n");
    } else {
        w.write("</table>\n");
    }
    WalkStatus::Continue
}

fn render_table_row(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    let doc = w.doc();
    let header = matches!(doc.node(id).data, NodeData::TableRow { header: true });
    let first_body = !header
        && doc
            .previous_sibling(id)
            .is_some_and(|prev| matches!(doc.node(prev).data, NodeData::TableRow { header: true }));
    let last_body = !header && doc.next_sibling(id).is_none();

    if entering {
        if header {
            w.write("<thead>\n");
        } else if first_body {
            w.write("<tbody>\n");
        }
        w.open_tag("tr", id);
        w.write("\n");
    } else {
        w.write("</tr>\n");
        if header {
            w.write("</thead>\n");
        } else if last_body {
            w.write("</tbody>\n");
        }
    }
    WalkStatus::Continue
}

fn render_table_cell(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    let (header, align) = match w.doc().node(id).data {
        NodeData::TableCell { header, align } => (header, align),
        _ => (false, Default::default()),
    };
    let tag = if header { "th" } else { "td" };
    if entering {
        w.write("<");
        w.write(tag);
        if let Some(align) = align.as_str() {
            w.write(&format!(" align=\"{align}\""));
        }
        w.write_attributes(id);
        w.write(">");
    } else {
        w.write(&format!("</{tag}>\n"));
    }
    WalkStatus::Continue
}

fn render_definition_list(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        w.open_tag("dl", id);
        w.write("\n");
    } else {
        w.write("</dl>\n");
    }
    WalkStatus::Continue
}

fn render_definition_term(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if entering {
        w.open_tag("dt", id);
    } else {
        w.write("</dt>\n");
    }
    WalkStatus::Continue
}

fn render_definition_description(
    w: &mut HtmlWriter<'_>,
    id: NodeId,
    entering: bool,
) -> WalkStatus {
    if entering {
        open_item(w, "dd", id);
    } else {
        w.write("</dd>\n");
    }
    WalkStatus::Continue
}

fn render_text(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if !entering {
        return WalkStatus::Continue;
    }
    let text: String = w.lines(id).collect();
    w.write_escaped(&text);
    if matches!(w.doc().node(id).data, NodeData::Text { soft_break: true }) {
        w.write("\n");
    }
    WalkStatus::SkipChildren
}

fn render_code_span(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
    if !entering {
        return WalkStatus::Continue;
    }
    let text: String = w.lines(id).collect();
    w.write("<code>");
    w.write_escaped(&text);
    w.write("</code>");
    WalkStatus::SkipChildren
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use xi_rope::Rope;

    use crate::parsing::parse_document;
    use crate::render::HtmlRenderer;

    fn to_html(md: &str) -> String {
        let rope = Rope::from(md);
        let parsed = parse_document(&rope);
        HtmlRenderer::new().render(&parsed.document, &parsed.source)
    }

    #[rstest]
    #[case::heading("## Hi ##\n", "<h2>Hi</h2>\n")]
    #[case::soft_break("a\nb\n", "<p>a\nb</p>\n")]
    #[case::code_span("x `a<b>` y\n", "<p>x <code>a&lt;b&gt;</code> y</p>\n")]
    #[case::escaped_text("fish & chips\n", "<p>fish &amp; chips</p>\n")]
    #[case::thematic_break("***\n", "<hr>\n")]
    #[case::quote("> q\n", "<blockquote>\n<p>q</p>\n</blockquote>\n")]
    #[case::tight_list("- a\n- b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n")]
    #[case::loose_list(
        "- a\n\n- b\n",
        "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
    )]
    #[case::nested_list(
        "- a\n  - b\n",
        "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n"
    )]
    #[case::ordered_start("3. x\n", "<ol start=\"3\">\n<li>x</li>\n</ol>\n")]
    #[case::fenced_code(
        "```rust\nlet x = 1 < 2;\n```\n",
        "<pre><code class=\"language-rust\">let x = 1 &lt; 2;\n</code></pre>\n"
    )]
    #[case::indented_code("    a\n\n    b\n", "<pre><code>a\n\nb\n</code></pre>\n")]
    #[case::definition_list("Apple\n: A fruit\n", "<dl>\n<dt>Apple</dt>\n<dd>A fruit</dd>\n</dl>\n")]
    fn renders_core_blocks(#[case] md: &str, #[case] expected: &str) {
        assert_eq!(to_html(md), expected);
    }

    #[test]
    fn renders_table_sections() {
        let html = to_html("| a | b |\n|:--|---|\n| 1 | 2 |\n| 3 | 4 |\n");
        assert_eq!(
            html,
            "<table>\n\
             <thead>\n<tr>\n<th align=\"left\">a</th>\n<th>b</th>\n</tr>\n</thead>\n\
             <tbody>\n\
             <tr>\n<td align=\"left\">1</td>\n<td>2</td>\n</tr>\n\
             <tr>\n<td align=\"left\">3</td>\n<td>4</td>\n</tr>\n\
             </tbody>\n\
             </table>\n"
        );
    }

    #[test]
    fn header_only_table_has_no_body() {
        let html = to_html("a | b\n--|--\n");
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n<th>a</th>\n<th>b</th>\n</tr>\n</thead>\n</table>\n"
        );
    }
}
