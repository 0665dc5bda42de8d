//! Keyboard navigation over pages loaded from a snapshot, driven through the
//! public dispatcher the way the TUI drives it.

use std::fs;
use std::path::Path;

use chanview::io::site::{Site, SnapshotSite};
use chanview::model::NavConfig;
use chanview::nav::{self, Context, Effect, FocusTarget, MemoryFlags, Mode, Navigator, SessionFlags};
use chanview::tui::layout::DocumentLayout;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn create_test_snapshot(root: &Path) {
    fs::write(
        root.join("boards.json"),
        r#"{"boards":[
            {"board":"an","title":"Announcements"},
            {"board":"x","title":"Fanart"},
            {"board":"g","title":"Technology"}
        ]}"#,
    )
    .unwrap();
    fs::create_dir_all(root.join("g/thread")).unwrap();
    fs::write(
        root.join("g/thread/7.json"),
        r##"{"posts":[
            {"no":7,"com":"first"},
            {"no":8,"resto":7,"com":"second"},
            {"no":9,"resto":7,"com":"<a href=\"#p7\" class=\"quotelink\">&gt;&gt;7</a> <a href=\"#p8\" class=\"quotelink\">&gt;&gt;8</a><br>https://example.com/a"}
        ]}"##,
    )
    .unwrap();
}

struct Harness {
    _dir: TempDir,
    nav: Navigator,
    layout: DocumentLayout,
    flags: MemoryFlags,
}

impl Harness {
    fn open(url: &str) -> Self {
        let dir = TempDir::new().unwrap();
        create_test_snapshot(dir.path());
        let page = SnapshotSite::new(dir.path()).load(url).unwrap();
        let layout = DocumentLayout::build(&page.items, 60);
        let nav = Navigator::new(page, &NavConfig::default(), &layout);
        Harness {
            _dir: dir,
            nav,
            layout,
            flags: MemoryFlags::default(),
        }
    }

    fn press(&mut self, code: KeyCode) -> (bool, Vec<Effect>) {
        let mut ctx = Context {
            focus: FocusTarget::Document,
            layout: &self.layout,
            flags: &mut self.flags,
        };
        let outcome = nav::handle_key(&mut self.nav, KeyEvent::new(code, KeyModifiers::NONE), &mut ctx);
        (outcome.handled, outcome.effects)
    }
}

#[test]
fn quick_jump_ranks_code_prefix_before_title_match() {
    let mut h = Harness::open("/");
    h.press(KeyCode::Char('a'));
    h.press(KeyCode::Char('n'));
    let codes: Vec<&str> = h
        .nav
        .quick_jump()
        .unwrap()
        .matches()
        .iter()
        .map(|e| e.code.as_str())
        .collect();
    assert_eq!(codes, vec!["an", "x"]);

    h.press(KeyCode::Down);
    let (handled, effects) = h.press(KeyCode::Enter);
    assert!(handled);
    assert_eq!(effects, vec![Effect::Navigate("/board/x/catalog".into())]);
    assert!(h.flags.quick_jump_navigated());
}

#[test]
fn backspace_on_single_char_query_closes_overlay() {
    let mut h = Harness::open("/");
    h.press(KeyCode::Char('g'));
    assert_eq!(h.nav.mode(), Mode::OverlayOpen);
    let (handled, effects) = h.press(KeyCode::Backspace);
    assert!(handled);
    assert!(effects.is_empty());
    assert_eq!(h.nav.mode(), Mode::Browsing);
}

#[test]
fn thread_links_cluster_by_line_and_follow_quotes() {
    let mut h = Harness::open("/board/g/thread/7?selected=9");
    assert_eq!(h.nav.cursor(), Some(2));
    let rows: Vec<Vec<usize>> = h.nav.rows().iter().map(|r| r.links.clone()).collect();
    assert_eq!(rows, vec![vec![0, 1], vec![2]]);

    // into focus, across to >>8, then activate
    h.press(KeyCode::Char('s'));
    h.press(KeyCode::Char('d'));
    assert_eq!(h.nav.active_link(), Some(1));
    let (handled, effects) = h.press(KeyCode::Char('e'));
    assert!(handled);
    assert_eq!(h.nav.cursor(), Some(1));
    assert_eq!(h.nav.link_focus(), None);
    assert_eq!(effects, vec![Effect::ScrollIntoView { item: 1 }]);
}

#[test]
fn external_link_opens_outside() {
    let mut h = Harness::open("/board/g/thread/7?selected=9");
    // wrap backwards from no focus lands on the first link, then up wraps to the URL row
    h.press(KeyCode::Char('w'));
    h.press(KeyCode::Char('w'));
    assert_eq!(h.nav.active_link(), Some(2));
    let (_, effects) = h.press(KeyCode::Char('e'));
    assert_eq!(effects, vec![Effect::OpenExternal("https://example.com/a".into())]);
}

#[test]
fn selection_stays_in_range() {
    let mut h = Harness::open("/board/g/thread/7");
    let keys = [
        KeyCode::Up,
        KeyCode::Char('k'),
        KeyCode::Down,
        KeyCode::Down,
        KeyCode::Char('j'),
        KeyCode::Char('j'),
        KeyCode::Down,
        KeyCode::Char('s'),
        KeyCode::Char('a'),
        KeyCode::Up,
    ];
    for key in keys {
        h.press(key);
        let cursor = h.nav.cursor().unwrap();
        assert!(cursor < h.nav.items().len());
    }
    assert_eq!(h.nav.cursor(), Some(1));
}

#[test]
fn backspace_off_home_goes_back() {
    let mut h = Harness::open("/board/g/thread/7");
    let (handled, effects) = h.press(KeyCode::Backspace);
    assert!(handled);
    assert_eq!(effects, vec![Effect::GoBack]);
}
