use serde::Serialize;

use super::page::{Page, Screen};

/// A flattened board record backing quick-jump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardEntry {
    pub code: String,
    pub title: String,
    /// Navigation target (empty when the item has none)
    pub target: String,
    /// Position of the source item in the home list
    pub index: usize,
}

/// Build the quick-jump dataset from a page. Only the home screen has one.
pub fn board_dataset(page: &Page) -> Vec<BoardEntry> {
    if page.screen != Screen::Home {
        return Vec::new();
    }
    page.items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (code, title) = item
                .board
                .as_ref()
                .map(|b| (b.code.clone(), b.title.clone()))
                .unwrap_or_default();
            BoardEntry {
                code,
                title,
                target: item.target.clone().unwrap_or_default(),
                index,
            }
        })
        .collect()
}
