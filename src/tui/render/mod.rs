pub mod description;
pub mod item_list;
pub mod quick_jump;
pub mod status_row;
pub mod title_bar;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use super::app::App;

/// Narrowest terminal that still gets the home description panel
const DESCRIPTION_MIN_WIDTH: u16 = 72;
const DESCRIPTION_WIDTH: u16 = 30;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);

    if app.page().error.is_some() {
        render_error(frame, app, chunks[1]);
    } else {
        let (list_area, side_area) = split_content(app, chunks[1]);
        app.sync_viewport(list_area.width, list_area.height);
        item_list::render_item_list(frame, app, list_area);
        if let Some(side) = side_area {
            description::render_description(frame, app, side);
        }
    }

    // Quick-jump overlay (rendered on top of the list)
    if app.nav().quick_jump().is_some() {
        quick_jump::render_quick_jump(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// The home screen gets a description panel on the right when there is room
fn split_content(app: &App, area: Rect) -> (Rect, Option<Rect>) {
    if !app.nav().screen().is_home() || area.width < DESCRIPTION_MIN_WIDTH {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(DESCRIPTION_WIDTH)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let message = app.page().error.clone().unwrap_or_default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Backspace to go back, h for home",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
