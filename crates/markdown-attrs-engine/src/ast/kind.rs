use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Broad category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Block,
    Inline,
}

/// The kind of a node in the document tree.
///
/// Kinds carry no payload so they can be listed in configuration
/// (`eligible_kinds = ["paragraph", "list"]`); per-kind details live in
/// [`NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    ThematicBreak,
    CodeBlock,
    BlockQuote,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    /// Placeholder left by an attribute block line until the merge pass.
    AttributeBlock,
    Text,
    CodeSpan,
}

impl NodeKind {
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Document,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::ThematicBreak,
        NodeKind::CodeBlock,
        NodeKind::BlockQuote,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableCell,
        NodeKind::DefinitionList,
        NodeKind::DefinitionTerm,
        NodeKind::DefinitionDescription,
        NodeKind::AttributeBlock,
        NodeKind::Text,
        NodeKind::CodeSpan,
    ];

    pub fn node_type(self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Text | NodeKind::CodeSpan => NodeType::Inline,
            _ => NodeType::Block,
        }
    }

    /// Blocks whose content lines are parsed into inline children.
    pub fn has_inline_content(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::DefinitionTerm
                | NodeKind::TableCell
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::CodeBlock => "code_block",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::List => "list",
            NodeKind::ListItem => "list_item",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table_row",
            NodeKind::TableCell => "table_cell",
            NodeKind::DefinitionList => "definition_list",
            NodeKind::DefinitionTerm => "definition_term",
            NodeKind::DefinitionDescription => "definition_description",
            NodeKind::AttributeBlock => "attribute_block",
            NodeKind::Text => "text",
            NodeKind::CodeSpan => "code_span",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownNodeKind(s.to_string()))
    }
}

/// Fence character of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// Opening fence of a fenced code block, kept to match the closing fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub kind: FenceKind,
    /// Number of fence characters in the opener.
    pub len: usize,
    /// Indentation (columns) of the opener, stripped from content lines.
    pub indent: usize,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// Per-kind payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeData {
    #[default]
    None,
    Heading {
        level: u8,
    },
    CodeBlock {
        /// `None` for indented code.
        fence: Option<Fence>,
        info: Option<String>,
    },
    List {
        /// Bullet character, or `.`/`)` for ordered lists.
        marker: u8,
        ordered: bool,
        start: u32,
        tight: bool,
    },
    ListItem {
        /// Column at which the item's content starts.
        offset: usize,
    },
    TableRow {
        header: bool,
    },
    TableCell {
        header: bool,
        align: Alignment,
    },
    DefinitionList {
        tight: bool,
    },
    DefinitionDescription {
        offset: usize,
    },
    Text {
        /// A line break follows this text in the source.
        soft_break: bool,
    },
}
