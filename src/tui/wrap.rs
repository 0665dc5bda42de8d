use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// A single visual (screen) line produced by wrapping text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Index of the `\n`-separated line this row belongs to
    pub logical_line: usize,
    /// Byte offset in the whole text where this row starts
    pub byte_start: usize,
    /// Byte offset (exclusive) where this row ends
    pub byte_end: usize,
}

fn is_whitespace(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Wrap one logical line into byte ranges of at most `width` cells.
///
/// Breaks at whitespace; whitespace that overflows a row is dropped. A word
/// that does not fit on an empty row is split between graphemes.
pub fn wrap_line(line: &str, width: usize) -> Vec<Range<usize>> {
    if width == 0 || unicode::display_width(line) <= width {
        return vec![0..line.len()];
    }
    let gs: Vec<(usize, &str)> = line.grapheme_indices(true).collect();
    let byte_at = |idx: usize| gs.get(idx).map_or(line.len(), |g| g.0);

    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut col = 0;
    let mut i = 0;
    while i < gs.len() {
        let token_start = i;
        let ws = is_whitespace(gs[i].1);
        while i < gs.len() && is_whitespace(gs[i].1) == ws {
            i += 1;
        }
        let token_width: usize = gs[token_start..i]
            .iter()
            .map(|g| unicode::grapheme_width(g.1))
            .sum();

        if col + token_width <= width {
            col += token_width;
            continue;
        }
        if ws {
            rows.push(row_start..byte_at(token_start));
            row_start = byte_at(i);
            col = 0;
            continue;
        }
        if col > 0 {
            rows.push(row_start..byte_at(token_start));
            row_start = byte_at(token_start);
            col = 0;
        }
        for &(offset, g) in &gs[token_start..i] {
            let gw = unicode::grapheme_width(g);
            if col + gw > width && col > 0 {
                rows.push(row_start..offset);
                row_start = offset;
                col = 0;
            }
            col += gw;
        }
    }
    if row_start < line.len() || rows.is_empty() {
        rows.push(row_start..line.len());
    }
    rows
}

/// Wrap multi-line text. Offsets in the result index into `text`.
pub fn wrap_text(text: &str, width: usize) -> Vec<VisualLine> {
    let mut out = Vec::new();
    let mut offset = 0;
    for (n, line) in text.split('\n').enumerate() {
        for range in wrap_line(line, width) {
            out.push(VisualLine {
                logical_line: n,
                byte_start: offset + range.start,
                byte_end: offset + range.end,
            });
        }
        offset += line.len() + 1;
    }
    out
}

/// Visual (row, column) of the byte at `byte` in wrapped `text`
pub fn locate(text: &str, lines: &[VisualLine], byte: usize) -> Option<(usize, usize)> {
    let row = lines
        .iter()
        .position(|l| l.byte_start <= byte && byte < l.byte_end)?;
    let line = &lines[row];
    let col = unicode::display_col(&text[line.byte_start..line.byte_end], byte - line.byte_start);
    Some((row, col))
}
