use xi_rope::Rope;

use crate::ast::{Document, NodeId};
use crate::parsing::rope::slice::slice_to_string;

/// Output buffer handed to render handlers, with read access to the tree
/// and the source.
pub struct HtmlWriter<'a> {
    doc: &'a Document,
    source: &'a Rope,
    out: String,
}

impl<'a> HtmlWriter<'a> {
    pub fn new(doc: &'a Document, source: &'a Rope) -> Self {
        Self {
            doc,
            source,
            out: String::new(),
        }
    }

    pub fn doc(&self) -> &'a Document {
        self.doc
    }

    pub fn source(&self) -> &'a Rope {
        self.source
    }

    pub fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    pub fn write_escaped(&mut self, s: &str) {
        html_escape::encode_text_to_string(s, &mut self.out);
    }

    /// Writes the node's attributes as ` name="value"` pairs.
    pub fn write_attributes(&mut self, id: NodeId) {
        for attr in self.doc.attributes(id) {
            self.out.push(' ');
            self.out.push_str(&attr.name);
            self.out.push_str("=\"");
            html_escape::encode_double_quoted_attribute_to_string(&attr.value, &mut self.out);
            self.out.push('"');
        }
    }

    /// Writes `<tag attrs>`.
    pub fn open_tag(&mut self, tag: &str, id: NodeId) {
        self.out.push('<');
        self.out.push_str(tag);
        self.write_attributes(id);
        self.out.push('>');
    }

    /// Source text of each content line of `id`.
    pub fn lines(&self, id: NodeId) -> impl Iterator<Item = String> + '_ {
        self.doc
            .node(id)
            .lines
            .iter()
            .map(|sp| slice_to_string(self.source, *sp))
    }

    pub fn into_html(self) -> String {
        self.out
    }
}
