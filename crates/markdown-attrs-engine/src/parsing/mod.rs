//! # Parsing
//!
//! Source text to document tree, in three passes:
//!
//! 1. **Blocks**: [`blocks::BlockBuilder`] feeds every line through the
//!    registered [`BlockParser`]s, in priority order
//! 2. **Inlines**: [`inline::attach_inlines`] fills paragraphs, headings,
//!    terms and table cells with text and code spans
//! 3. **Transformers**: registered [`Transformer`]s rewrite the finished
//!    tree, in priority order
//!
//! The source is kept as an `xi_rope::Rope`; nodes refer to it by byte
//! spans.

pub mod blocks;
pub mod inline;
pub mod rope;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use log::debug;
use xi_rope::Rope;

use crate::ast::{Document, dump};
use blocks::kinds::{
    AtxHeading, BlockQuote, CodeFence, DefinitionDescription, DefinitionList, IndentedCode, List,
    ListItem, ThematicBreak,
};
use blocks::{BlockBuilder, BlockParser};
use rope::lines_with_spans;

/// A registered component with its ordering key. Smaller runs first.
pub struct Prioritized<T> {
    pub value: T,
    pub priority: i32,
}

/// Counters shared by transformers during one parse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Context {
    counters: BTreeMap<&'static str, usize>,
}

impl Context {
    pub fn bump(&mut self, key: &'static str) {
        *self.counters.entry(key).or_default() += 1;
    }

    pub fn count(&self, key: &str) -> usize {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn counters(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counters.iter().map(|(k, v)| (*k, *v))
    }
}

/// A pass over the finished tree.
pub trait Transformer {
    fn name(&self) -> &'static str;

    fn transform(&self, doc: &mut Document, source: &Rope, cx: &mut Context);
}

/// Output of [`Parser::parse`].
#[derive(Debug)]
pub struct ParsedDoc {
    pub document: Document,
    pub source: Rope,
    pub context: Context,
}

impl ParsedDoc {
    /// Indented outline of the tree, see [`crate::ast::dump`].
    pub fn dump(&self) -> String {
        dump(&self.document, &self.source)
    }
}

/// Block parsers and transformers, each kept sorted by priority.
pub struct Parser {
    block_parsers: Vec<Prioritized<Box<dyn BlockParser>>>,
    transformers: Vec<Prioritized<Box<dyn Transformer>>>,
}

impl Parser {
    /// A parser with the core block kinds registered.
    pub fn new() -> Self {
        let mut parser = Self {
            block_parsers: vec![],
            transformers: vec![],
        };
        parser.add_block_parser(Box::new(DefinitionList), 101);
        parser.add_block_parser(Box::new(DefinitionDescription), 102);
        parser.add_block_parser(Box::new(ThematicBreak), 200);
        parser.add_block_parser(Box::new(List), 300);
        parser.add_block_parser(Box::new(ListItem), 400);
        parser.add_block_parser(Box::new(IndentedCode), 500);
        parser.add_block_parser(Box::new(AtxHeading), 600);
        parser.add_block_parser(Box::new(CodeFence), 700);
        parser.add_block_parser(Box::new(BlockQuote), 800);
        parser
    }

    /// Registers a block parser. Parsers with equal priority keep their
    /// registration order.
    pub fn add_block_parser(&mut self, parser: Box<dyn BlockParser>, priority: i32) {
        self.block_parsers.push(Prioritized {
            value: parser,
            priority,
        });
        self.block_parsers.sort_by_key(|p| p.priority);
    }

    pub fn add_transformer(&mut self, transformer: Box<dyn Transformer>, priority: i32) {
        self.transformers.push(Prioritized {
            value: transformer,
            priority,
        });
        self.transformers.sort_by_key(|t| t.priority);
    }

    pub fn parse(&self, source: Rope) -> ParsedDoc {
        let mut document = {
            let mut builder = BlockBuilder::new(&self.block_parsers, &source);
            for line in lines_with_spans(&source) {
                builder.push(&line);
            }
            builder.finish()
        };
        inline::attach_inlines(&mut document, &source);

        let mut context = Context::default();
        for t in &self.transformers {
            debug!("running transformer {}", t.value.name());
            t.value.transform(&mut document, &source, &mut context);
        }

        ParsedDoc {
            document,
            source,
            context,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses with the core block kinds only.
pub fn parse_document(rope: &Rope) -> ParsedDoc {
    Parser::new().parse(rope.clone())
}
