use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::item_list::spans_width;

/// Render the page title with the URL right-aligned, and a separator below
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;
    let page = app.page();

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(" ", bg_style),
        Span::styled(
            page.title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !app.history.is_empty() {
        spans.push(Span::styled(
            format!("  \u{2190}{}", app.history.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    // URL on the right, dropped when it would collide with the title
    let used = spans_width(&spans);
    let url = format!("{} ", page.url);
    let url_width = unicode::display_width(&url);
    if used + 1 + url_width <= width {
        spans.push(Span::styled(" ".repeat(width - used - url_width), bg_style));
        spans.push(Span::styled(url, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let sep = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(Paragraph::new(Line::from(sep)).style(bg_style), chunks[1]);
}
