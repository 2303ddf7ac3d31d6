//! # Inline Kinds
//!
//! Inline types that own their delimiters. The parser refers to these
//! constants and never hardcodes the characters itself.

pub mod code_span;

pub use code_span::CodeSpan;
