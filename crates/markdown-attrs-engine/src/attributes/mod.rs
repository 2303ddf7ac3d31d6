//! # Block Attributes
//!
//! `{#id .class key="value"}` on a line of its own attaches attributes to
//! the adjacent block:
//!
//! ```text
//! {#intro .lead}
//! First paragraph.
//! ```
//!
//! renders as `<p id="intro" class="lead">First paragraph.</p>`.
//!
//! The extension has three parts:
//!
//! - **`syntax`**: the `{...}` micro-syntax, cursor based
//! - **`block`**: a block parser that turns attribute lines into
//!   `AttributeBlock` placeholder nodes
//! - **`transform`**: a pass that merges each placeholder onto its target
//!   and removes it
//!
//! plus a render handler (**`render`**) that writes nothing for any
//! placeholder still in the tree.
//!
//! ## Merge rules
//!
//! - The target is the next sibling (or the previous one with
//!   [`MergeDirection::Previous`]), stepping over stacked placeholders
//! - No blank line may separate the placeholder from its target
//! - The target must be a block of an eligible kind
//! - Placeholders without a target are dropped

pub mod block;
pub mod render;
pub mod syntax;
pub mod transform;

pub use block::AttributeBlockParser;
pub use syntax::parse_attributes;
pub use transform::AttributeTransformer;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ast::NodeKind;
use crate::error::Error;
use crate::markdown::Extension;
use crate::parsing::Parser;
use crate::render::HtmlRenderer;

/// Kinds that receive attributes unless configured otherwise.
pub const DEFAULT_ELIGIBLE_KINDS: [NodeKind; 7] = [
    NodeKind::BlockQuote,
    NodeKind::Heading,
    NodeKind::List,
    NodeKind::Paragraph,
    NodeKind::ThematicBreak,
    NodeKind::Table,
    NodeKind::DefinitionList,
];

/// Parser, transformer and render handler priority.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Which sibling an attribute block annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeDirection {
    /// The block after it.
    #[default]
    Next,
    /// The block before it (trailing annotation).
    Previous,
}

impl fmt::Display for MergeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeDirection::Next => "next",
            MergeDirection::Previous => "previous",
        })
    }
}

impl FromStr for MergeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(MergeDirection::Next),
            "previous" | "prev" => Ok(MergeDirection::Previous),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

/// What happens when the target already has an attribute of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    #[default]
    Overwrite,
    KeepExisting,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::KeepExisting => "keep_existing",
        })
    }
}

impl FromStr for ConflictPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            "keep_existing" => Ok(ConflictPolicy::KeepExisting),
            _ => Err(Error::UnknownConflictPolicy(s.to_string())),
        }
    }
}

/// Settings of the [`BlockAttributes`] extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// `None` uses [`DEFAULT_ELIGIBLE_KINDS`]; an empty list disables the
    /// extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_kinds: Option<Vec<NodeKind>>,
    pub direction: MergeDirection,
    pub on_conflict: ConflictPolicy,
    pub priority: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            eligible_kinds: None,
            direction: MergeDirection::default(),
            on_conflict: ConflictPolicy::default(),
            priority: DEFAULT_PRIORITY,
        }
    }
}

impl Options {
    pub fn eligible_kinds(&self) -> &[NodeKind] {
        self.eligible_kinds
            .as_deref()
            .unwrap_or(&DEFAULT_ELIGIBLE_KINDS)
    }

    pub fn is_enabled(&self) -> bool {
        !self.eligible_kinds.as_ref().is_some_and(Vec::is_empty)
    }
}

/// The block attributes extension.
#[derive(Debug, Clone, Default)]
pub struct BlockAttributes {
    options: Options,
}

impl BlockAttributes {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl Extension for BlockAttributes {
    fn extend(&self, parser: &mut Parser, renderer: &mut HtmlRenderer) {
        if !self.options.is_enabled() {
            debug!("block attributes disabled: no eligible kinds");
            return;
        }
        let priority = self.options.priority;
        parser.add_block_parser(Box::new(AttributeBlockParser), priority);
        parser.add_transformer(Box::new(AttributeTransformer::new(&self.options)), priority);
        renderer.register(
            NodeKind::AttributeBlock,
            priority,
            render::render_attribute_block,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Document, NodeData, NodeId, WalkStatus};
    use crate::render::HtmlWriter;
    use rstest::rstest;
    use xi_rope::Rope;

    #[rstest]
    #[case("next", MergeDirection::Next)]
    #[case("Previous", MergeDirection::Previous)]
    #[case(" prev ", MergeDirection::Previous)]
    fn direction_from_str(#[case] input: &str, #[case] expected: MergeDirection) {
        assert_eq!(input.parse::<MergeDirection>(), Ok(expected));
    }

    #[rstest]
    #[case("overwrite", ConflictPolicy::Overwrite)]
    #[case("keep_existing", ConflictPolicy::KeepExisting)]
    #[case("keep-existing", ConflictPolicy::KeepExisting)]
    fn conflict_policy_from_str(#[case] input: &str, #[case] expected: ConflictPolicy) {
        assert_eq!(input.parse::<ConflictPolicy>(), Ok(expected));
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(
            "sideways".parse::<MergeDirection>(),
            Err(Error::UnknownDirection("sideways".into()))
        );
        assert_eq!(
            "merge".parse::<ConflictPolicy>(),
            Err(Error::UnknownConflictPolicy("merge".into()))
        );
    }

    #[test]
    fn default_options() {
        let options = Options::default();
        assert!(options.is_enabled());
        assert_eq!(options.eligible_kinds(), DEFAULT_ELIGIBLE_KINDS);
        assert_eq!(options.priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn empty_kind_list_disables() {
        let options = Options {
            eligible_kinds: Some(vec![]),
            ..Options::default()
        };
        assert!(!options.is_enabled());

        let mut parser = Parser::new();
        let mut renderer = HtmlRenderer::new();
        BlockAttributes::new(options).extend(&mut parser, &mut renderer);
        assert!(!renderer.has_handler(NodeKind::AttributeBlock));
    }

    fn show_placeholder(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
        if entering {
            w.open_tag("aside", id);
            w.write("</aside>\n");
        }
        WalkStatus::SkipChildren
    }

    fn render_with_priority(priority: i32) -> String {
        let mut parser = Parser::new();
        let mut renderer = HtmlRenderer::new();
        renderer.register(NodeKind::AttributeBlock, 50, show_placeholder);
        let options = Options {
            priority,
            ..Options::default()
        };
        BlockAttributes::new(options).extend(&mut parser, &mut renderer);

        let mut doc = Document::new();
        let root = doc.root();
        let block = doc.new_node(NodeKind::AttributeBlock, NodeData::None);
        doc.attributes_mut(block).set("id", "x");
        doc.append_child(root, block);
        renderer.render(&doc, &Rope::from(""))
    }

    #[rstest]
    #[case::lower_value_wins(10, "")]
    #[case::higher_value_yields(100, "<aside id=\"x\"></aside>\n")]
    fn priority_decides_placeholder_handler(#[case] priority: i32, #[case] expected: &str) {
        assert_eq!(render_with_priority(priority), expected);
    }
}
