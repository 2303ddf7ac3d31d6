use xi_rope::Rope;

use crate::parsing::{ParsedDoc, Parser};
use crate::render::HtmlRenderer;

/// Something that plugs block parsers, transformers and render handlers
/// into a [`Markdown`] pipeline.
pub trait Extension {
    fn extend(&self, parser: &mut Parser, renderer: &mut HtmlRenderer);
}

/// Parser and renderer configured together.
pub struct Markdown {
    parser: Parser,
    renderer: HtmlRenderer,
}

impl Markdown {
    /// Core Markdown only.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            renderer: HtmlRenderer::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Extension) -> Self {
        extension.extend(&mut self.parser, &mut self.renderer);
        self
    }

    pub fn parse(&self, source: &str) -> ParsedDoc {
        self.parser.parse(Rope::from(source))
    }

    pub fn render(&self, doc: &ParsedDoc) -> String {
        self.renderer.render(&doc.document, &doc.source)
    }

    /// Parses and renders `source` to HTML.
    pub fn convert(&self, source: &str) -> String {
        self.render(&self.parse(source))
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeId, NodeKind, WalkStatus};
    use crate::render::HtmlWriter;

    struct LoudParagraphs;

    fn loud(w: &mut HtmlWriter<'_>, id: NodeId, entering: bool) -> WalkStatus {
        if entering {
            w.open_tag("strong", id);
        } else {
            w.write("</strong>\n");
        }
        WalkStatus::Continue
    }

    impl Extension for LoudParagraphs {
        fn extend(&self, _parser: &mut Parser, renderer: &mut HtmlRenderer) {
            renderer.register(NodeKind::Paragraph, 10, loud);
        }
    }

    #[test]
    fn convert_without_extensions() {
        assert_eq!(Markdown::new().convert("hi"), "<p>hi</p>\n");
    }

    #[test]
    fn extension_overrides_core_handler() {
        let md = Markdown::new().with_extension(LoudParagraphs);
        assert_eq!(md.convert("hi"), "<strong>hi</strong>\n");
    }

    #[test]
    fn attribute_lines_are_text_without_the_extension() {
        assert_eq!(
            Markdown::new().convert("{#id}\ntext"),
            "<p>{#id}\ntext</p>\n"
        );
    }
}
