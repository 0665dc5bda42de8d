use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies
pub const TAB_WIDTH: usize = 4;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Display width of one grapheme cluster
pub fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        TAB_WIDTH
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Column (in cells) at which `byte_offset` starts. Offsets past the end
/// clamp to the full width.
pub fn display_col(s: &str, byte_offset: usize) -> usize {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        if i >= byte_offset {
            break;
        }
        col += grapheme_width(g);
    }
    col
}

/// Truncate to `max_cells`, ending with `…` when something was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let room = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = grapheme_width(g);
        if width + gw > room {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}
