use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::site::{SnapshotSite, fixtures};
use crate::model::Config;
use crate::nav::MemoryFlags;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    buffer_text(&terminal)
}

/// Render the whole app into an in-memory buffer
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| super::render(frame, app))
        .unwrap();
    buffer_text(&terminal)
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over the fixture snapshot, opened at `url`, with in-memory flags.
/// Keep the directory alive for as long as the app loads pages.
pub fn test_app(url: &str) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    fixtures::write_snapshot(dir.path());
    let site = SnapshotSite::new(dir.path());
    let app = App::new(
        Box::new(site),
        Config::default(),
        Box::new(MemoryFlags::default()),
        url,
    );
    (dir, app)
}
