use crate::model::Item;
use crate::ops::rows::{LinkLayout, LinkPosition};

use super::wrap::{VisualLine, locate, wrap_text};

/// Height of one terminal line in layout units. Large enough that adjacent
/// lines never fall inside the row tolerance.
pub const LINE_HEIGHT: f32 = 16.0;
/// Width of one terminal cell in layout units
pub const CELL_WIDTH: f32 = 8.0;
/// Body text is indented under the heading
pub const BODY_INDENT: usize = 2;

/// Where one item sits in the scrollable document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBox {
    /// First document line (the heading)
    pub top: usize,
    /// Heading plus body lines, without the blank separator
    pub height: usize,
    /// Wrapped body rows
    pub body: Vec<VisualLine>,
}

/// Item list laid out for a given terminal width: one heading line per item,
/// the wrapped body below it, and a blank line between items.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    width: u16,
    boxes: Vec<ItemBox>,
    /// Per item, per link: (document line, cell column)
    links: Vec<Vec<Option<(usize, usize)>>>,
    total_lines: usize,
}

impl DocumentLayout {
    pub fn build(items: &[Item], width: u16) -> Self {
        let wrap_width = (width as usize).saturating_sub(BODY_INDENT).max(1);
        let mut boxes = Vec::with_capacity(items.len());
        let mut links = Vec::with_capacity(items.len());
        let mut line = 0;

        for item in items {
            let body = if item.body.is_empty() {
                Vec::new()
            } else {
                wrap_text(&item.body, wrap_width)
            };
            let top = line;
            let item_links = item
                .links
                .iter()
                .map(|link| {
                    locate(&item.body, &body, link.span.start)
                        .map(|(row, col)| (top + 1 + row, BODY_INDENT + col))
                })
                .collect();
            let height = 1 + body.len();
            line += height + 1;
            boxes.push(ItemBox { top, height, body });
            links.push(item_links);
        }

        DocumentLayout {
            width,
            boxes,
            links,
            total_lines: line.saturating_sub(1),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn item_box(&self, item: usize) -> Option<&ItemBox> {
        self.boxes.get(item)
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Document line and cell column of a link's first character
    pub fn link_cell(&self, item: usize, link: usize) -> Option<(usize, usize)> {
        self.links.get(item)?.get(link).copied().flatten()
    }

    /// Scroll offset that puts `item` in the middle of a viewport of
    /// `height` lines, clamped to the document.
    pub fn centered_scroll(&self, item: usize, height: usize) -> usize {
        let Some(b) = self.boxes.get(item) else {
            return 0;
        };
        let middle = b.top + b.height / 2;
        let max_scroll = self.total_lines.saturating_sub(height);
        middle.saturating_sub(height / 2).min(max_scroll)
    }
}

impl LinkLayout for DocumentLayout {
    fn link_position(&self, item: usize, link: usize) -> Option<LinkPosition> {
        self.link_cell(item, link).map(|(line, col)| LinkPosition {
            top: line as f32 * LINE_HEIGHT,
            left: col as f32 * CELL_WIDTH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Link;
    use crate::ops::rows::cluster_rows;

    fn item(body: &str, links: Vec<Link>) -> Item {
        Item {
            heading: "Anonymous No.1".into(),
            body: body.into(),
            links,
            ..Default::default()
        }
    }

    #[test]
    fn boxes_stack_with_blank_separator() {
        let items = vec![item("one line", vec![]), item("", vec![]), item("a\nb", vec![])];
        let layout = DocumentLayout::build(&items, 40);
        let tops: Vec<usize> = (0..3).map(|i| layout.item_box(i).unwrap().top).collect();
        assert_eq!(tops, vec![0, 3, 5]);
        assert_eq!(layout.item_box(2).unwrap().height, 3);
        assert_eq!(layout.total_lines(), 8);
    }

    #[test]
    fn links_get_document_positions() {
        let body = ">>100 >>101\nhttps://example.com";
        let items = vec![
            item("first", vec![]),
            item(
                body,
                vec![
                    Link::quote(0..5, "100"),
                    Link::quote(6..11, "101"),
                    Link::external(12..31, "https://example.com"),
                ],
            ),
        ];
        let layout = DocumentLayout::build(&items, 40);
        assert_eq!(layout.link_cell(1, 0), Some((4, 2)));
        assert_eq!(layout.link_cell(1, 1), Some((4, 8)));
        assert_eq!(layout.link_cell(1, 2), Some((5, 2)));
        assert_eq!(layout.link_cell(1, 3), None);
        assert_eq!(
            layout.link_position(1, 1),
            Some(LinkPosition {
                top: 64.0,
                left: 64.0
            })
        );
    }

    #[test]
    fn terminal_lines_cluster_into_separate_rows() {
        let body = ">>1 >>2\n>>3";
        let items = vec![item(
            body,
            vec![Link::quote(0..3, "1"), Link::quote(4..7, "2"), Link::quote(8..11, "3")],
        )];
        let layout = DocumentLayout::build(&items, 40);
        let rows = cluster_rows(&layout, 0, 3, 6.0);
        let links: Vec<Vec<usize>> = rows.into_iter().map(|r| r.links).collect();
        assert_eq!(links, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn wrapping_moves_links_down() {
        let body = ">>100 >>200";
        let items = vec![item(body, vec![Link::quote(0..5, "100"), Link::quote(6..11, "200")])];
        let layout = DocumentLayout::build(&items, 8);
        assert_eq!(layout.link_cell(0, 0), Some((1, 2)));
        assert_eq!(layout.link_cell(0, 1), Some((2, 2)));
    }

    #[test]
    fn centered_scroll_clamps() {
        let items: Vec<Item> = (0..10).map(|_| item("body", vec![])).collect();
        let layout = DocumentLayout::build(&items, 40);
        // each item: heading + body + blank = 3 lines; 29 lines total
        assert_eq!(layout.centered_scroll(0, 10), 0);
        assert_eq!(layout.centered_scroll(5, 10), 11);
        assert_eq!(layout.centered_scroll(9, 10), 19);
        assert_eq!(layout.centered_scroll(42, 10), 0);
    }
}
