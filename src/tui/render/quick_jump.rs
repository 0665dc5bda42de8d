use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

const MAX_INNER_WIDTH: u16 = 48;

/// Render the quick-jump overlay: query line, separator, ranked boards
pub fn render_quick_jump(frame: &mut Frame, app: &App, area: Rect) {
    let Some(qj) = app.nav().quick_jump() else {
        return;
    };

    let bg = app.theme.background;
    let sel_bg = app.theme.selection_bg;
    let highlight = app.theme.highlight;

    let prompt_style = Style::default()
        .fg(highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let input_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(highlight).bg(bg);
    let normal_style = Style::default().fg(app.theme.text).bg(bg);
    let blank_style = Style::default().bg(bg);

    let inner_w = area.width.saturating_sub(4).min(MAX_INNER_WIDTH) as usize;
    let popup_w = inner_w as u16 + 2;

    let mut lines: Vec<Line> = Vec::new();

    // Input line: " > query▌"
    let input_spans = vec![
        Span::styled(" > ", prompt_style),
        Span::styled(qj.query().to_string(), input_style),
        Span::styled("\u{258C}", cursor_style),
    ];
    lines.push(Line::from(input_spans));

    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(inner_w),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    if qj.matches().is_empty() {
        let msg = "No matching boards";
        let left_pad = inner_w.saturating_sub(msg.len()) / 2;
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(left_pad), blank_style),
            Span::styled(msg, normal_style),
        ]));
    } else {
        for (i, entry) in qj.matches().iter().enumerate() {
            let is_selected = i == qj.selected();
            let row_bg = if is_selected { sel_bg } else { bg };
            let indicator = if is_selected { " \u{25B6} " } else { "   " };
            let code_style = Style::default()
                .fg(highlight)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD);
            let title_style = if is_selected {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(row_bg)
            };

            let code = format!("/{}/", entry.code);
            let room = inner_w.saturating_sub(3 + unicode::display_width(&code) + 3);
            let mut spans = vec![
                Span::styled(indicator, Style::default().fg(highlight).bg(row_bg)),
                Span::styled(code, code_style),
                Span::styled(" - ", Style::default().fg(app.theme.dim).bg(row_bg)),
                Span::styled(unicode::truncate_to_width(&entry.title, room), title_style),
            ];
            let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
            if used < inner_w {
                spans.push(Span::styled(" ".repeat(inner_w - used), Style::default().bg(row_bg)));
            }
            lines.push(Line::from(spans));
        }
    }

    let popup_h = (lines.len() as u16 + 2).min(area.height); // +2 for borders

    // Centered horizontally, near the top of the content area
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + 2.min(area.height.saturating_sub(popup_h));
    let popup_area = Rect::new(x, y, popup_w.min(area.width), popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, popup_area);
}
