use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{BoardInfo, Item, Link, Page, Screen};
use crate::ops::rows::{LinkLayout, LinkPosition};

/// Link positions given as literal coordinates
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    positions: HashMap<(usize, usize), LinkPosition>,
}

impl GridLayout {
    /// Place links of `item`: each entry is `(link, top, left)`.
    pub fn place(mut self, item: usize, links: &[(usize, f32, f32)]) -> Self {
        for &(link, top, left) in links {
            self.positions.insert((item, link), LinkPosition { top, left });
        }
        self
    }
}

impl LinkLayout for GridLayout {
    fn link_position(&self, item: usize, link: usize) -> Option<LinkPosition> {
        self.positions.get(&(item, link)).copied()
    }
}

/// A thread page; each entry is a post id and the space-separated ids it
/// quotes. The body is those quotes, one link per quote.
pub fn thread_page(posts: &[(&str, &str)]) -> Page {
    let mut page = Page::new("/board/g/thread/1", Screen::Thread, "/g/ thread 1");
    page.items = posts
        .iter()
        .map(|(id, quotes)| {
            let mut body = String::new();
            let mut links = Vec::new();
            for quote in quotes.split_whitespace() {
                if !body.is_empty() {
                    body.push(' ');
                }
                let start = body.len();
                body.push_str(&format!(">>{}", quote));
                links.push(Link::quote(start..body.len(), quote));
            }
            Item {
                heading: format!("Anonymous No.{}", id),
                body,
                links,
                post_id: Some(id.to_string()),
                target: Some(format!("/board/g/thread/1/post/{}", id)),
                ..Default::default()
            }
        })
        .collect();
    page
}

/// A home page listing `(code, title)` boards
pub fn home_page(boards: &[(&str, &str)]) -> Page {
    let mut page = Page::new("/", Screen::Home, "Boards");
    page.items = boards
        .iter()
        .map(|(code, title)| Item {
            heading: format!("/{}/ - {}", code, title),
            target: Some(format!("/board/{}/catalog", code)),
            description: Some(format!("{} board", title)),
            board: Some(BoardInfo {
                code: code.to_string(),
                title: title.to_string(),
            }),
            ..Default::default()
        })
        .collect();
    page
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
