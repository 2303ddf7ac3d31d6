use crate::ast::{NodeId, WalkStatus};
use crate::render::HtmlWriter;

/// Placeholders are normally gone before rendering; any left over render as
/// nothing.
pub fn render_attribute_block(_: &mut HtmlWriter<'_>, _: NodeId, _: bool) -> WalkStatus {
    WalkStatus::SkipChildren
}

#[cfg(test)]
mod tests {
    use xi_rope::Rope;

    use crate::ast::{Document, NodeData, NodeKind};
    use crate::render::HtmlRenderer;

    use super::*;

    #[test]
    fn leftover_placeholder_renders_nothing() {
        let mut doc = Document::new();
        let root = doc.root();
        let block = doc.new_node(NodeKind::AttributeBlock, NodeData::None);
        doc.attributes_mut(block).set("id", "x");
        doc.append_child(root, block);

        let mut renderer = HtmlRenderer::new();
        renderer.register(NodeKind::AttributeBlock, 100, render_attribute_block);
        assert_eq!(renderer.render(&doc, &Rope::from("")), "");
    }
}
