//! # HTML Rendering
//!
//! A depth-first walk over the tree that dispatches on node kind.
//!
//! Each kind has at most one handler. Extensions register their own handlers
//! with a priority; a smaller value replaces a handler registered with a
//! larger one, so extensions can both add kinds and override core output.
//!
//! ## Modules
//!
//! - **`writer`**: `HtmlWriter`, the output buffer and attribute emission
//! - **`html`**: handlers for the core block and inline kinds

pub mod html;
pub mod writer;

pub use writer::HtmlWriter;

use std::collections::HashMap;

use xi_rope::Rope;

use crate::ast::{Document, NodeId, NodeKind, WalkStatus, walk};

/// Renders one node. Called with `entering = true` before the children and
/// `false` after them.
pub type RenderFn = fn(&mut HtmlWriter<'_>, NodeId, bool) -> WalkStatus;

/// Priority of the core handlers.
pub const CORE_PRIORITY: i32 = 1000;

pub struct HtmlRenderer {
    handlers: HashMap<NodeKind, (i32, RenderFn)>,
}

impl HtmlRenderer {
    /// A renderer with handlers for every core kind.
    pub fn new() -> Self {
        let mut renderer = Self {
            handlers: HashMap::new(),
        };
        for (kind, handler) in html::core_handlers() {
            renderer.register(kind, CORE_PRIORITY, handler);
        }
        renderer
    }

    /// Registers `handler` for `kind` unless a handler with a smaller
    /// priority is already registered.
    pub fn register(&mut self, kind: NodeKind, priority: i32, handler: RenderFn) {
        match self.handlers.get(&kind) {
            Some(&(existing, _)) if existing < priority => {}
            _ => {
                self.handlers.insert(kind, (priority, handler));
            }
        }
    }

    pub fn has_handler(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Nodes without a handler are walked through transparently.
    pub fn render(&self, doc: &Document, source: &Rope) -> String {
        let mut w = HtmlWriter::new(doc, source);
        walk(doc, doc.root(), &mut |id, entering| {
            match self.handlers.get(&doc.kind(id)) {
                Some((_, handler)) => handler(&mut w, id, entering),
                None => WalkStatus::Continue,
            }
        });
        w.into_html()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeData;

    fn shout(w: &mut HtmlWriter<'_>, _: NodeId, entering: bool) -> WalkStatus {
        if entering {
            w.write("<P>");
        }
        WalkStatus::SkipChildren
    }

    fn whisper(w: &mut HtmlWriter<'_>, _: NodeId, entering: bool) -> WalkStatus {
        if entering {
            w.write("<small>");
        }
        WalkStatus::SkipChildren
    }

    fn one_paragraph() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.new_node(NodeKind::Paragraph, NodeData::None);
        doc.append_child(root, p);
        doc
    }

    #[test]
    fn smaller_priority_replaces_handler() {
        let mut renderer = HtmlRenderer::new();
        renderer.register(NodeKind::Paragraph, 10, shout);
        renderer.register(NodeKind::Paragraph, 20, whisper);

        let html = renderer.render(&one_paragraph(), &Rope::from(""));
        assert_eq!(html, "<P>");
    }

    #[test]
    fn core_kinds_have_handlers() {
        let renderer = HtmlRenderer::new();
        assert!(renderer.has_handler(NodeKind::Paragraph));
        assert!(renderer.has_handler(NodeKind::Table));
        assert!(!renderer.has_handler(NodeKind::AttributeBlock));
    }
}
