use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::site::{Site, error_page};
use crate::io::state::FileFlags;
use crate::model::{Config, Page};
use crate::nav::{Effect, Navigator, SessionFlags};

use super::input;
use super::layout::DocumentLayout;
use super::render;
use super::theme::Theme;

/// One page in the history: its navigation state and scroll position are
/// kept while it sits on the back stack.
#[derive(Debug, Clone)]
pub struct Entry {
    pub nav: Navigator,
    /// First visible document line
    pub scroll: usize,
}

/// Main application state
pub struct App {
    site: Box<dyn Site>,
    pub config: Config,
    pub theme: Theme,
    pub current: Entry,
    /// Pages to return to, most recent last
    pub history: Vec<Entry>,
    /// Layout of the current page's items at the current list width
    pub layout: DocumentLayout,
    pub flags: Box<dyn SessionFlags>,
    /// Location prompt input (Ctrl+L); holds keyboard focus while open
    pub prompt: Option<String>,
    /// One-line message for the status row
    pub status: Option<String>,
    pub should_quit: bool,
    /// Height of the item list viewport, updated on render
    pub viewport_height: usize,
    /// Item to center on the next frame
    pending_scroll: Option<usize>,
}

impl App {
    pub fn new(site: Box<dyn Site>, config: Config, flags: Box<dyn SessionFlags>, url: &str) -> Self {
        let theme = Theme::from_config(&config.ui);
        let page = load_page(site.as_ref(), url);
        let layout = DocumentLayout::build(&page.items, 80);
        let nav = Navigator::new(page, &config.nav, &layout);

        let mut app = App {
            site,
            config,
            theme,
            current: Entry { nav, scroll: 0 },
            history: Vec::new(),
            layout,
            flags,
            prompt: None,
            status: None,
            should_quit: false,
            viewport_height: 20,
            pending_scroll: None,
        };
        app.show_current();
        app.pending_scroll = app.current.nav.cursor();
        app
    }

    pub fn nav(&self) -> &Navigator {
        &self.current.nav
    }

    pub fn page(&self) -> &Page {
        self.current.nav.page()
    }

    /// Carry out navigation effects in order
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(url) => self.navigate(&url),
                Effect::GoBack => self.go_back(),
                Effect::OpenExternal(url) => self.open_external(&url),
                Effect::ScrollIntoView { item } => self.pending_scroll = Some(item),
            }
        }
    }

    /// Load `url` and make it the current page, pushing the old one
    pub fn navigate(&mut self, url: &str) {
        let page = load_page(self.site.as_ref(), url);
        self.layout = DocumentLayout::build(&page.items, self.layout.width());
        let nav = Navigator::new(page, &self.config.nav, &self.layout);
        let previous = std::mem::replace(&mut self.current, Entry { nav, scroll: 0 });
        self.history.push(previous);
        self.show_current();
        self.pending_scroll = self.current.nav.cursor();
    }

    /// Return to the previous page with its state as it was left
    pub fn go_back(&mut self) {
        let Some(previous) = self.history.pop() else {
            self.status = Some("No previous page".into());
            return;
        };
        tracing::debug!(url = %previous.nav.page().url, "back");
        self.current = previous;
        self.layout = DocumentLayout::build(self.current.nav.items(), self.layout.width());
        self.show_current();
    }

    fn open_external(&mut self, url: &str) {
        tracing::info!(url, "opening external link");
        match webbrowser::open(url) {
            Ok(()) => self.status = Some(format!("Opened {}", url)),
            Err(e) => {
                tracing::warn!(url, error = %e, "could not open browser");
                self.status = Some(format!("Could not open {}: {}", url, e));
            }
        }
    }

    fn show_current(&mut self) {
        self.current.nav.on_page_show(self.flags.as_mut());
    }

    /// Match the layout to the list area and apply any pending scroll.
    /// Called by the renderer before drawing the list.
    pub fn sync_viewport(&mut self, width: u16, height: u16) {
        if width != self.layout.width() {
            self.layout = DocumentLayout::build(self.current.nav.items(), width);
            self.current.nav.reflow(&self.layout);
            self.pending_scroll = self.pending_scroll.or(self.current.nav.cursor());
        }
        self.viewport_height = height as usize;
        if let Some(item) = self.pending_scroll.take() {
            self.current.scroll = self.layout.centered_scroll(item, self.viewport_height);
        }
        let max_scroll = self.layout.total_lines().saturating_sub(self.viewport_height);
        self.current.scroll = self.current.scroll.min(max_scroll);
    }
}

fn load_page(site: &dyn Site, url: &str) -> Page {
    match site.load(url) {
        Ok(page) => page,
        Err(e) => error_page(url, &e),
    }
}

/// Where to start the browser
pub struct RunOptions {
    pub site: Box<dyn Site>,
    /// Holds the session state file
    pub site_dir: PathBuf,
    pub url: String,
    pub config: Config,
}

pub fn run(opts: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let flags = FileFlags::load(&opts.site_dir);
    let mut app = App::new(opts.site, opts.config, Box::new(flags), &opts.url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
