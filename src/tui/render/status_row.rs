use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::Mode;
use crate::tui::app::App;

use super::item_list::spans_width;

/// Key hints for the current mode
fn key_hints(app: &App) -> &'static str {
    match app.nav().mode() {
        Mode::OverlayOpen => "\u{2191}\u{2193} choose  Enter go  Esc close",
        Mode::LinkFocused => "w/s row  a/d link  e open  j/k item",
        Mode::Browsing if app.nav().quick_jump_available() => {
            "j/k move  Enter open  type to jump  ^L go to"
        }
        Mode::Browsing => "j/k move  Enter open  w/s links  \u{232B} back  h home",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = if let Some(input) = &app.prompt {
        // Location prompt: Go to: url▌
        vec![
            Span::styled("Go to: ", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(input.clone(), Style::default().fg(app.theme.text_bright).bg(bg)),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        ]
    } else if let Some(status) = &app.status {
        vec![Span::styled(
            status.clone(),
            Style::default().fg(app.theme.text).bg(bg),
        )]
    } else {
        Vec::new()
    };

    let hint = if app.prompt.is_some() {
        Some("Enter go  Esc cancel")
    } else if app.config.ui.show_key_hints {
        Some(key_hints(app))
    } else {
        None
    };
    if let Some(hint) = hint {
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
