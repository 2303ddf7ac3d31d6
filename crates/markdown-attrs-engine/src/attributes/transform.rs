use log::debug;
use xi_rope::Rope;

use crate::ast::{Document, NodeId, NodeKind, NodeType, WalkStatus, walk};
use crate::parsing::rope::slice::preview;
use crate::parsing::{Context, Transformer};

use super::{ConflictPolicy, MergeDirection, Options};

/// Context counter: attribute blocks merged onto a target.
pub const MERGED: &str = "attributes.merged";
/// Context counter: attribute blocks dropped without a target.
pub const DISCARDED: &str = "attributes.discarded";

const PREVIEW_LEN: usize = 40;

/// Moves the attributes of every `AttributeBlock` onto its adjacent block
/// and removes the placeholders.
///
/// Placeholders are collected in document order first and only unlinked
/// once all of them have been merged, so stacked blocks can step over each
/// other to reach the same target.
pub struct AttributeTransformer {
    eligible: Vec<NodeKind>,
    direction: MergeDirection,
    on_conflict: ConflictPolicy,
}

impl AttributeTransformer {
    pub fn new(options: &Options) -> Self {
        Self {
            eligible: options.eligible_kinds().to_vec(),
            direction: options.direction,
            on_conflict: options.on_conflict,
        }
    }

    fn is_eligible(&self, doc: &Document, id: NodeId) -> bool {
        let kind = doc.kind(id);
        kind.node_type() == NodeType::Block && self.eligible.contains(&kind)
    }

    /// The sibling that receives `block`'s attributes, stepping over
    /// neighbouring placeholders. Any blank line on the way means there is
    /// no target.
    fn target(&self, doc: &Document, block: NodeId) -> Option<NodeId> {
        let mut current = block;
        loop {
            let candidate = match self.direction {
                MergeDirection::Next => {
                    let next = doc.next_sibling(current)?;
                    if doc.has_blank_previous_lines(next) {
                        return None;
                    }
                    next
                }
                MergeDirection::Previous => {
                    if doc.has_blank_previous_lines(current) {
                        return None;
                    }
                    doc.previous_sibling(current)?
                }
            };
            if doc.kind(candidate) == NodeKind::AttributeBlock {
                current = candidate;
                continue;
            }
            return self.is_eligible(doc, candidate).then_some(candidate);
        }
    }

    fn merge(&self, doc: &mut Document, block: NodeId, target: NodeId) {
        let attrs = doc.attributes(block).clone();
        let existing = doc.attributes_mut(target);
        for attr in &attrs {
            if self.on_conflict == ConflictPolicy::KeepExisting && existing.contains(&attr.name) {
                continue;
            }
            existing.set(attr.name.clone(), attr.value.clone());
        }
    }
}

fn describe(doc: &Document, source: &Rope, id: NodeId) -> String {
    match doc.node(id).lines.first() {
        Some(line) => format!("{} {:?}", doc.kind(id), preview(source, *line, PREVIEW_LEN)),
        None => doc.kind(id).to_string(),
    }
}

impl Transformer for AttributeTransformer {
    fn name(&self) -> &'static str {
        "block_attributes"
    }

    fn transform(&self, doc: &mut Document, source: &Rope, cx: &mut Context) {
        let mut placeholders = vec![];
        walk(doc, doc.root(), &mut |id, entering| {
            if entering && doc.kind(id) == NodeKind::AttributeBlock {
                placeholders.push(id);
                return WalkStatus::SkipChildren;
            }
            WalkStatus::Continue
        });

        for &block in &placeholders {
            match self.target(doc, block) {
                Some(target) => {
                    debug!(
                        "merging {} onto {}",
                        describe(doc, source, block),
                        describe(doc, source, target)
                    );
                    self.merge(doc, block, target);
                    cx.bump(MERGED);
                }
                None => {
                    debug!(
                        "discarding {}: no adjacent eligible block",
                        describe(doc, source, block)
                    );
                    cx.bump(DISCARDED);
                }
            }
        }

        for block in placeholders {
            if let Some(parent) = doc.parent(block) {
                doc.remove_child(parent, block);
            }
        }
    }
}
