//! # Document Tree
//!
//! An arena-backed tree of block and inline nodes.
//!
//! Nodes live in a `Vec` owned by [`Document`] and refer to each other by
//! [`NodeId`]. Removing a node only unlinks it: its id stays valid (and
//! detached) until the document is dropped, so ids collected during a walk
//! never dangle.
//!
//! ## Modules
//!
//! - **`kind`**: `NodeKind`, `NodeType` and per-kind `NodeData`
//! - **`attributes`**: ordered `Attributes` map carried by every node
//! - **`dump`**: human-readable tree dump for diagnostics and snapshots

pub mod attributes;
pub mod dump;
pub mod kind;

pub use attributes::{Attribute, Attributes};
pub use dump::dump;
pub use kind::{Alignment, Fence, FenceKind, NodeData, NodeKind, NodeType};

use crate::parsing::rope::span::Span;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A node with its links, attributes and source spans.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub data: NodeData,
    pub attributes: Attributes,
    /// Content spans: one per source line for leaf blocks, a single span for
    /// inline nodes.
    pub lines: Vec<Span>,
    /// One or more blank source lines directly precede this node.
    pub blank_previous_lines: bool,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, data: NodeData) -> Self {
        Self {
            kind,
            data,
            attributes: Attributes::new(),
            lines: Vec::new(),
            blank_previous_lines: false,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }
}

/// Controls how [`walk`] proceeds after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    SkipChildren,
    Stop,
}

/// The document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, NodeData::None)],
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Creates a detached node. Attach it with [`Document::append_child`] or
    /// [`Document::insert_before`].
    pub fn new_node(&mut self, kind: NodeKind, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, data));
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn attributes(&self, id: NodeId) -> &Attributes {
        &self.node(id).attributes
    }

    pub fn attributes_mut(&mut self, id: NodeId) -> &mut Attributes {
        &mut self.node_mut(id).attributes
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    pub fn has_blank_previous_lines(&self, id: NodeId) -> bool {
        self.node(id).blank_previous_lines
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.node(parent).last_child;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = last;
        }
        match last {
            Some(last) => self.node_mut(last).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Inserts `child` directly before `reference`, which must be a child of
    /// `parent`.
    pub fn insert_before(&mut self, parent: NodeId, reference: NodeId, child: NodeId) {
        debug_assert_eq!(self.parent(reference), Some(parent));
        self.detach(child);
        let prev = self.node(reference).prev_sibling;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = prev;
            c.next_sibling = Some(reference);
        }
        self.node_mut(reference).prev_sibling = Some(child);
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
    }

    /// Unlinks `child` from `parent`. Does nothing if `child` belongs to
    /// another parent.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        let n = self.node_mut(id);
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.next_sibling(id);
        Some(id)
    }
}

/// Depth-first walk calling `visit(id, entering)` on the way in and out of
/// every node below and including `start`.
///
/// `SkipChildren` on entry skips the subtree (the exit call still happens);
/// `Stop` ends the walk.
pub fn walk<F>(doc: &Document, start: NodeId, visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeId, bool) -> WalkStatus,
{
    match visit(start, true) {
        WalkStatus::Stop => return WalkStatus::Stop,
        WalkStatus::SkipChildren => {}
        WalkStatus::Continue => {
            let mut child = doc.first_child(start);
            while let Some(id) = child {
                if walk(doc, id, visit) == WalkStatus::Stop {
                    return WalkStatus::Stop;
                }
                child = doc.next_sibling(id);
            }
        }
    }
    match visit(start, false) {
        WalkStatus::Stop => WalkStatus::Stop,
        _ => WalkStatus::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(doc: &mut Document) -> NodeId {
        doc.new_node(NodeKind::Paragraph, NodeData::None)
    }

    fn kinds(doc: &Document, parent: NodeId) -> Vec<NodeKind> {
        doc.children(parent).map(|c| doc.kind(c)).collect()
    }

    #[test]
    fn append_links_siblings() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = para(&mut doc);
        let b = para(&mut doc);
        doc.append_child(root, a);
        doc.append_child(root, b);

        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(b));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.previous_sibling(b), Some(a));
        assert_eq!(doc.parent(b), Some(root));
    }

    #[test]
    fn insert_before_first_child() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = para(&mut doc);
        doc.append_child(root, a);
        let list = doc.new_node(NodeKind::List, NodeData::None);
        doc.insert_before(root, a, list);

        assert_eq!(kinds(&doc, root), [NodeKind::List, NodeKind::Paragraph]);
        assert_eq!(doc.previous_sibling(a), Some(list));
        assert_eq!(doc.first_child(root), Some(list));
    }

    #[test]
    fn remove_middle_child_relinks_neighbours() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = para(&mut doc);
        let b = doc.new_node(NodeKind::AttributeBlock, NodeData::None);
        let c = para(&mut doc);
        for id in [a, b, c] {
            doc.append_child(root, id);
        }

        doc.remove_child(root, b);

        assert_eq!(doc.next_sibling(a), Some(c));
        assert_eq!(doc.previous_sibling(c), Some(a));
        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.children(root).count(), 2);
    }

    #[test]
    fn remove_only_child_empties_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = para(&mut doc);
        doc.append_child(root, a);
        doc.remove_child(root, a);

        assert_eq!(doc.first_child(root), None);
        assert_eq!(doc.last_child(root), None);
    }

    #[test]
    fn remove_child_ignores_foreign_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.new_node(NodeKind::BlockQuote, NodeData::None);
        let a = para(&mut doc);
        doc.append_child(root, quote);
        doc.append_child(quote, a);

        doc.remove_child(root, a);
        assert_eq!(doc.parent(a), Some(quote));
    }

    #[test]
    fn walk_visits_in_document_order_and_skips() {
        let mut doc = Document::new();
        let root = doc.root();
        let quote = doc.new_node(NodeKind::BlockQuote, NodeData::None);
        let inner = para(&mut doc);
        let after = para(&mut doc);
        doc.append_child(root, quote);
        doc.append_child(quote, inner);
        doc.append_child(root, after);

        let mut seen = vec![];
        walk(&doc, root, &mut |id, entering| {
            if entering {
                seen.push(id);
            }
            if entering && doc.kind(id) == NodeKind::BlockQuote {
                WalkStatus::SkipChildren
            } else {
                WalkStatus::Continue
            }
        });

        assert_eq!(seen, [root, quote, after]);
    }
}
