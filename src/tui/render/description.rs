use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::App;

/// Side panel describing the selected board (home screen)
pub fn render_description(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = app
        .nav()
        .selected_item()
        .and_then(|item| item.board.as_ref())
        .map(|b| format!(" /{}/ ", b.code))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.nav().description().to_string(),
            Style::default().fg(app.theme.text).bg(bg),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
