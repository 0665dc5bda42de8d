use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Item, LinkTarget};
use crate::tui::app::App;
use crate::tui::layout::{BODY_INDENT, ItemBox};
use crate::tui::wrap::VisualLine;
use crate::util::unicode;

/// Render the visible window of the current page's items
pub fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let lines = if app.nav().is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Nothing here",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ]
    } else {
        visible_lines(app, app.current.scroll, area.height as usize)
    };
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Document lines `scroll..scroll + height`
fn visible_lines(app: &App, scroll: usize, height: usize) -> Vec<Line<'static>> {
    let end = scroll + height;
    let mut lines = Vec::with_capacity(height);
    for (index, item) in app.nav().items().iter().enumerate() {
        let Some(b) = app.layout.item_box(index) else {
            break;
        };
        if b.top >= end {
            break;
        }
        // heading, body rows, blank separator
        if b.top + b.height < scroll {
            continue;
        }
        for (row, line) in item_lines(app, index, item, b).into_iter().enumerate() {
            let line_no = b.top + row;
            if line_no >= scroll && line_no < end {
                lines.push(line);
            }
        }
    }
    lines
}

fn item_lines(app: &App, index: usize, item: &Item, b: &ItemBox) -> Vec<Line<'static>> {
    let selected = app.nav().cursor() == Some(index);
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let active = if selected { app.nav().active_link() } else { None };

    let mut lines = Vec::with_capacity(b.height + 1);

    let marker = if selected {
        Span::styled(
            "\u{258C} ",
            Style::default().fg(app.theme.selection_border).bg(row_bg),
        )
    } else {
        Span::styled("  ", Style::default().bg(row_bg))
    };
    let mut heading_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
    if selected {
        heading_style = heading_style.add_modifier(Modifier::BOLD);
    }
    lines.push(Line::from(vec![marker, Span::styled(item.heading.clone(), heading_style)]));

    for visual in &b.body {
        let mut spans = vec![Span::styled(
            " ".repeat(BODY_INDENT),
            Style::default().bg(row_bg),
        )];
        push_body_spans(&mut spans, app, item, visual, active, row_bg);
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines
}

/// Split one wrapped body row into plain text and link spans
fn push_body_spans(
    spans: &mut Vec<Span<'static>>,
    app: &App,
    item: &Item,
    visual: &VisualLine,
    active: Option<usize>,
    row_bg: ratatui::style::Color,
) {
    let text_style = Style::default().fg(app.theme.text).bg(row_bg);
    let slice = |start: usize, end: usize| item.body.get(start..end).unwrap_or("").to_string();

    let mut pos = visual.byte_start;
    for (link_index, link) in item.links.iter().enumerate() {
        let start = link.span.start.max(visual.byte_start);
        let end = link.span.end.min(visual.byte_end);
        if start >= end || start < pos {
            continue;
        }
        if start > pos {
            spans.push(Span::styled(slice(pos, start), text_style));
        }
        let style = if active == Some(link_index) {
            Style::default()
                .fg(app.theme.active_link_fg)
                .bg(app.theme.active_link_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            let fg = match &link.target {
                Some(LinkTarget::Quote(_)) => app.theme.quote,
                Some(LinkTarget::External(_)) => app.theme.url,
                None => app.theme.dim,
            };
            Style::default()
                .fg(fg)
                .bg(row_bg)
                .add_modifier(Modifier::UNDERLINED)
        };
        spans.push(Span::styled(slice(start, end), style));
        pos = end;
    }
    if pos < visual.byte_end {
        spans.push(Span::styled(slice(pos, visual.byte_end), text_style));
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
