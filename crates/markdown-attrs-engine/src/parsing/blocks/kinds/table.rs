use std::sync::OnceLock;

use regex::Regex;
use xi_rope::Rope;

use crate::ast::{Alignment, Document, NodeData, NodeId, NodeKind};
use crate::parsing::rope::{slice::slice_to_string, span::Span};

static DELIMITER_ROW: OnceLock<Regex> = OnceLock::new();

fn delimiter_row() -> &'static Regex {
    DELIMITER_ROW.get_or_init(|| {
        Regex::new(r"^\s*\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?\s*$")
            .expect("Invalid table delimiter regex")
    })
}

/// Pipe table (GFM style), recognized when a paragraph closes.
///
/// ```text
/// | Name | Qty |
/// |:-----|----:|
/// | tea  |   2 |
/// ```
///
/// The paragraph's first line is the header row and its second line the
/// delimiter row; every further line is a body row. Body rows are padded or
/// cut to the header's column count.
pub struct Table;

impl Table {
    pub const PIPE: u8 = b'|';

    /// Splits a row into cell byte ranges within `s`, dropping the outer
    /// pipes and the blanks around each cell. `\|` does not split.
    pub fn split_cells(s: &str) -> Vec<(usize, usize)> {
        let b = s.as_bytes();
        let is_blank = |c: u8| c == b' ' || c == b'\t';

        let mut start = 0;
        let mut end = b.len();
        while start < end && is_blank(b[start]) {
            start += 1;
        }
        while end > start && is_blank(b[end - 1]) {
            end -= 1;
        }
        if start < end && b[start] == Self::PIPE {
            start += 1;
        }
        if end > start && b[end - 1] == Self::PIPE && !(end >= start + 2 && b[end - 2] == b'\\') {
            end -= 1;
        }

        let trim = |mut s: usize, mut e: usize| {
            while s < e && is_blank(b[s]) {
                s += 1;
            }
            while e > s && is_blank(b[e - 1]) {
                e -= 1;
            }
            (s, e)
        };

        let mut cells = vec![];
        let mut cell_start = start;
        let mut i = start;
        while i < end {
            match b[i] {
                b'\\' => i += 2,
                b'|' => {
                    cells.push(trim(cell_start, i));
                    cell_start = i + 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        cells.push(trim(cell_start, end));
        cells
    }

    pub fn alignment(cell: &str) -> Alignment {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        }
    }

    /// Turns the paragraph `para` into a table in place if its first two
    /// lines form a header and delimiter row. Attributes and position are
    /// kept. Returns whether it converted.
    pub fn try_convert(doc: &mut Document, rope: &Rope, para: NodeId) -> bool {
        let lines = doc.node(para).lines.clone();
        if lines.len() < 2 {
            return false;
        }
        let header = slice_to_string(rope, lines[0]);
        let delim = slice_to_string(rope, lines[1]);
        if !delimiter_row().is_match(&delim) || !(header.contains('|') || delim.contains('|')) {
            return false;
        }

        let header_cells = Self::split_cells(&header);
        let delim_cells = Self::split_cells(&delim);
        if header_cells.len() != delim_cells.len() {
            return false;
        }
        let aligns: Vec<Alignment> = delim_cells
            .iter()
            .map(|&(s, e)| Self::alignment(&delim[s..e]))
            .collect();

        {
            let node = doc.node_mut(para);
            node.kind = NodeKind::Table;
            node.data = NodeData::None;
            node.lines.clear();
        }
        Self::push_row(doc, para, lines[0].start, &header_cells, &aligns, true);
        for line in &lines[2..] {
            let text = slice_to_string(rope, *line);
            let cells = Self::split_cells(&text);
            Self::push_row(doc, para, line.start, &cells, &aligns, false);
        }
        true
    }

    fn push_row(
        doc: &mut Document,
        table: NodeId,
        base: usize,
        cells: &[(usize, usize)],
        aligns: &[Alignment],
        header: bool,
    ) {
        let row = doc.new_node(NodeKind::TableRow, NodeData::TableRow { header });
        doc.append_child(table, row);
        for (col, &align) in aligns.iter().enumerate() {
            let cell = doc.new_node(NodeKind::TableCell, NodeData::TableCell { header, align });
            if let Some(&(s, e)) = cells.get(col)
                && e > s
            {
                doc.node_mut(cell).lines.push(Span::new(base + s, base + e));
            }
            doc.append_child(row, cell);
        }
    }
}
