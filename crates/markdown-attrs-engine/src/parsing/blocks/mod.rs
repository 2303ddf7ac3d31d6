//! # Block Parsing
//!
//! Line-by-line block parsing over an open-block stack.
//!
//! ## Parsing Phases (per line)
//!
//! 1. **Continuation**: every open block, outermost first, is asked whether
//!    the line continues it (`BlockParser::continue_block`). Containers
//!    consume their prefix (`>`, list item indentation) as they match.
//! 2. **Opening**: the first non-indent byte selects candidate parsers by
//!    trigger; they are tried in priority order until one opens a block.
//!    While a paragraph is open, only parsers that may interrupt it are tried.
//! 3. **Paragraph text**: whatever is left continues the open paragraph
//!    (including lazy continuation lines) or starts a new one.
//!
//! ## Modules
//!
//! - **`reader`**: `LineReader`, a tab-aware cursor over one line
//! - **`builder`**: `BlockBuilder`, the per-line state machine
//! - **`kinds`**: core block parsers, each owning its delimiter knowledge
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Every node created for a line gets `blank_previous_lines` from the
//!   line before it
//! - Block nodes store byte spans into the rope, never copied text

pub mod builder;
pub mod kinds;
pub mod reader;

pub use builder::BlockBuilder;
pub use reader::LineReader;

use crate::ast::{Document, NodeId};

/// What an open block wants after looking at a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The block continues and may contain child blocks on this line.
    Children,
    /// The block took the whole line; nothing else opens on it.
    NoChildren,
    /// Like `NoChildren`, and the block is complete after this line.
    Finished,
    /// The line does not continue the block.
    Close,
}

/// Result of offering a line to a parser's `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Open {
    /// A detached node (or an existing one to re-enter) and its state.
    Opened(NodeId, State),
    /// Not this parser; try the next one.
    NoMatch,
    /// Stop looking: the line is paragraph text.
    RequireParagraph,
}

/// Facts about the line being opened that parsers may need.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockContext {
    /// An open paragraph would be closed by opening a block here.
    pub interrupting_paragraph: bool,
}

/// A block-level recognizer plugged into [`BlockBuilder`].
pub trait BlockParser {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Bytes that may start this block after indentation; `None` means any.
    fn triggers(&self) -> Option<&'static [u8]>;

    /// Tries to open a block for the line under `parent`.
    ///
    /// The returned node is attached to `parent` by the builder unless it
    /// already has a parent. On `NoMatch` or `RequireParagraph` the reader
    /// is rewound by the caller.
    fn open(
        &self,
        doc: &mut Document,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        cx: &BlockContext,
    ) -> Open;

    /// Decides whether the line continues `node`.
    fn continue_block(
        &self,
        doc: &mut Document,
        node: NodeId,
        reader: &mut LineReader<'_>,
    ) -> State;

    /// Called once when `node` is closed.
    fn close(&self, _doc: &mut Document, _node: NodeId) {}

    fn can_interrupt_paragraph(&self) -> bool;

    /// Whether the parser is tried on lines indented by four or more columns.
    fn can_accept_indented_line(&self) -> bool {
        false
    }
}
