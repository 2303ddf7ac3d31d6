//! # markdown-attrs-engine
//!
//! A CommonMark-style block parser, HTML renderer, and the block attributes
//! extension that lets a `{#id .class key="value"}` line annotate the block
//! next to it.
//!
//! ```
//! use markdown_attrs_engine::{Markdown, attributes::BlockAttributes};
//!
//! let md = Markdown::new().with_extension(BlockAttributes::default());
//! assert_eq!(
//!     md.convert("{#id .class1}\ntext"),
//!     "<p id=\"id\" class=\"class1\">text</p>\n"
//! );
//! ```

pub mod ast;
pub mod attributes;
pub mod error;
pub mod markdown;
pub mod parsing;
pub mod render;

pub use ast::{Attribute, Attributes, Document, NodeId, NodeKind, NodeType};
pub use error::Error;
pub use markdown::{Extension, Markdown};
pub use parsing::{Context, ParsedDoc, Parser};
pub use render::HtmlRenderer;
