use xi_rope::Rope;

use crate::ast::{Document, NodeType, WalkStatus, walk};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All node spans are within rope bounds and not inverted
/// - Every child points back at the parent it is listed under
/// - Inline nodes only appear under inline-bearing blocks
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, doc: &Document) {
    let n = rope.len();
    walk(doc, doc.root(), &mut |id, entering| {
        if !entering {
            return WalkStatus::Continue;
        }
        let node = doc.node(id);
        for sp in &node.lines {
            assert!(
                sp.start <= sp.end && sp.end <= n,
                "span out of bounds: {sp:?} on {:?} (rope len: {n})",
                node.kind
            );
        }
        for child in doc.children(id) {
            assert_eq!(
                doc.parent(child),
                Some(id),
                "child {child:?} of {id:?} has a different parent"
            );
            if doc.kind(child).node_type() == NodeType::Inline {
                assert!(
                    node.kind.has_inline_content(),
                    "inline {:?} under {:?}",
                    doc.kind(child),
                    node.kind
                );
            }
        }
        WalkStatus::Continue
    });
}
