use log::trace;
use xi_rope::Rope;

use crate::ast::{Document, NodeId};
use crate::parsing::Prioritized;
use crate::parsing::rope::lines::LineRef;

use super::kinds::Paragraph;
use super::reader::CODE_INDENT;
use super::{BlockContext, BlockParser, LineReader, Open, State};

/// Who is responsible for an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opener {
    Document,
    Paragraph,
    /// Index into the builder's parser list.
    Parser(usize),
}

#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    node: NodeId,
    opener: Opener,
}

/// Builds the block tree one line at a time.
///
/// `parsers` must already be in priority order.
pub struct BlockBuilder<'a> {
    parsers: &'a [Prioritized<Box<dyn BlockParser>>],
    rope: &'a Rope,
    doc: Document,
    /// Open blocks from the document (index 0) down to the innermost one.
    stack: Vec<OpenBlock>,
    last_line_blank: bool,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(parsers: &'a [Prioritized<Box<dyn BlockParser>>], rope: &'a Rope) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            parsers,
            rope,
            doc,
            stack: vec![OpenBlock {
                node: root,
                opener: Opener::Document,
            }],
            last_line_blank: false,
        }
    }

    pub fn push(&mut self, line: &LineRef) {
        let mut reader = LineReader::new(line.content(), line.span.start);

        // Phase 1: continue open blocks
        let mut matched = 1;
        while matched < self.stack.len() {
            let open = self.stack[matched];
            let Opener::Parser(idx) = open.opener else {
                break;
            };
            let saved = reader.clone();
            let rest_blank = reader.is_blank();
            match self.parsers[idx].value.continue_block(&mut self.doc, open.node, &mut reader) {
                State::Children => matched += 1,
                State::NoChildren => {
                    self.last_line_blank = rest_blank;
                    return;
                }
                State::Finished => {
                    self.close_from(matched);
                    self.last_line_blank = false;
                    return;
                }
                State::Close => {
                    reader = saved;
                    break;
                }
            }
        }

        // Phase 2: open new blocks
        let tip_is_paragraph = self
            .stack
            .last()
            .is_some_and(|b| b.opener == Opener::Paragraph);
        let mut opened: Option<State> = None;
        let mut parent = self.stack[matched - 1].node;
        while !reader.is_blank() {
            let interrupting = tip_is_paragraph && opened.is_none();

            let Some((idx, node, state)) = self.try_open(parent, &mut reader, interrupting) else {
                break;
            };
            if opened.is_none() {
                self.close_from(matched);
            }
            if self.doc.parent(node).is_none() {
                self.doc.append_child(parent, node);
                self.doc.node_mut(node).blank_previous_lines = self.last_line_blank;
            }
            self.stack.push(OpenBlock {
                node,
                opener: Opener::Parser(idx),
            });
            parent = node;
            opened = Some(state);
            if state != State::Children {
                break;
            }
        }

        // Phase 3: the rest of the line
        let blank = reader.is_blank();
        match opened {
            Some(State::Finished) => {
                self.close_from(self.stack.len() - 1);
                self.last_line_blank = false;
                return;
            }
            Some(State::NoChildren | State::Close) => {}
            Some(State::Children) => {
                if !blank {
                    self.open_paragraph(&mut reader);
                }
            }
            None => {
                if blank {
                    self.close_from(matched);
                } else if tip_is_paragraph {
                    // Continuation, or a lazy line when containers above
                    // the paragraph did not match.
                    if let Some(tip) = self.stack.last() {
                        Paragraph::extend(&mut self.doc, tip.node, &mut reader);
                    }
                } else {
                    self.close_from(matched);
                    self.open_paragraph(&mut reader);
                }
            }
        }
        self.last_line_blank = blank;
    }

    /// Closes every open block and returns the document.
    pub fn finish(mut self) -> Document {
        self.close_from(1);
        self.doc
    }

    fn try_open(
        &mut self,
        parent: NodeId,
        reader: &mut LineReader<'_>,
        interrupting: bool,
    ) -> Option<(usize, NodeId, State)> {
        let first = reader.peek_nonblank()?;
        let indented = reader.indent() >= CODE_INDENT;
        let cx = BlockContext {
            interrupting_paragraph: interrupting,
        };

        for (idx, parser) in self.parsers.iter().map(|p| &p.value).enumerate() {
            if parser.triggers().is_some_and(|t| !t.contains(&first))
                || (interrupting && !parser.can_interrupt_paragraph())
                || (indented && !parser.can_accept_indented_line())
            {
                continue;
            }
            let saved = reader.clone();
            match parser.open(&mut self.doc, parent, reader, &cx) {
                Open::Opened(node, state) => {
                    trace!("{} opened {:?} at {}", parser.name(), node, saved.offset());
                    return Some((idx, node, state));
                }
                Open::NoMatch => *reader = saved,
                Open::RequireParagraph => {
                    *reader = saved;
                    return None;
                }
            }
        }
        None
    }

    fn open_paragraph(&mut self, reader: &mut LineReader<'_>) {
        let Some(parent) = self.stack.last().map(|b| b.node) else {
            return;
        };
        let id = Paragraph::open(&mut self.doc, parent, reader, self.last_line_blank);
        self.stack.push(OpenBlock {
            node: id,
            opener: Opener::Paragraph,
        });
    }

    /// Closes the blocks at `depth` and below, innermost first.
    fn close_from(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            let Some(block) = self.stack.pop() else {
                break;
            };
            match block.opener {
                Opener::Document => {}
                Opener::Paragraph => Paragraph::close(&mut self.doc, self.rope, block.node),
                Opener::Parser(idx) => self.parsers[idx].value.close(&mut self.doc, block.node),
            }
        }
    }
}
