use crate::model::{BoardEntry, Item, NavConfig, Page, Screen, board_dataset};
use crate::ops::rows::{LinkLayout, LinkRow, cluster_rows};

use super::links::LinkFocus;
use super::quick_jump::QuickJump;
use super::{Effect, Mode, SessionFlags};

/// Navigation state of one page.
///
/// The item list is fixed for the life of the navigator; only the cursor,
/// link focus and overlay change. Effects produced by operations queue up
/// until the host drains them with [`Navigator::take_effects`].
#[derive(Debug, Clone)]
pub struct Navigator {
    pub(super) page: Page,
    pub(super) config: NavConfig,
    /// Selected item; `None` only when the page has no items
    pub(super) cursor: Option<usize>,
    /// Link rows of the selected item
    pub(super) rows: Vec<LinkRow>,
    pub(super) link_focus: Option<LinkFocus>,
    pub(super) quick_jump: Option<QuickJump>,
    pub(super) dataset: Vec<BoardEntry>,
    /// Description panel text (home screen)
    pub(super) description: String,
    pub(super) effects: Vec<Effect>,
}

impl Navigator {
    /// Capture a page and place the cursor on its preselected item (or the
    /// first one).
    pub fn new(page: Page, config: &NavConfig, layout: &dyn LinkLayout) -> Self {
        let cursor = if page.items.is_empty() {
            None
        } else {
            Some(page.items.iter().position(|i| i.preselected).unwrap_or(0))
        };
        let dataset = board_dataset(&page);

        let mut nav = Navigator {
            page,
            config: config.clone(),
            cursor,
            rows: Vec::new(),
            link_focus: None,
            quick_jump: None,
            dataset,
            description: String::new(),
            effects: Vec::new(),
        };
        if let Some(index) = cursor {
            nav.update_description(index);
            nav.rows = nav.build_rows(index, layout);
        }
        nav
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn screen(&self) -> Screen {
        self.page.screen
    }

    pub fn items(&self) -> &[Item] {
        &self.page.items
    }

    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.cursor.and_then(|i| self.page.items.get(i))
    }

    pub fn rows(&self) -> &[LinkRow] {
        &self.rows
    }

    pub fn link_focus(&self) -> Option<LinkFocus> {
        self.link_focus
    }

    /// The link carrying the "active" mark: the focused link of the
    /// selected item, as an index into that item's links.
    pub fn active_link(&self) -> Option<usize> {
        let focus = self.link_focus?;
        self.rows.get(focus.row)?.links.get(focus.column).copied()
    }

    pub fn quick_jump(&self) -> Option<&QuickJump> {
        self.quick_jump.as_ref()
    }

    /// Whether this page offers the quick-jump overlay
    pub fn quick_jump_available(&self) -> bool {
        self.page.screen == Screen::Home && self.config.quick_jump
    }

    pub fn dataset(&self) -> &[BoardEntry] {
        &self.dataset
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mode(&self) -> Mode {
        if self.quick_jump.is_some() {
            Mode::OverlayOpen
        } else if self.link_focus.is_some() {
            Mode::LinkFocused
        } else {
            Mode::Browsing
        }
    }

    /// Drain the effects produced since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(super) fn emit(&mut self, effect: Effect) {
        tracing::debug!(?effect, "navigation effect");
        self.effects.push(effect);
    }

    /// Called whenever the page becomes visible again (first load or restored
    /// from history). Consumes the quick-jump navigation flag on the home
    /// screen, closing any overlay left open by that navigation.
    pub fn on_page_show(&mut self, flags: &mut dyn SessionFlags) {
        if self.page.screen == Screen::Home && flags.quick_jump_navigated() {
            tracing::debug!("closing quick-jump after navigation");
            self.close_quick_jump();
            flags.clear_quick_jump_navigated();
        }
    }

    pub(super) fn build_rows(&self, index: usize, layout: &dyn LinkLayout) -> Vec<LinkRow> {
        let link_count = self.page.items.get(index).map_or(0, |item| item.links.len());
        cluster_rows(layout, index, link_count, self.config.row_tolerance)
    }

    pub(super) fn update_description(&mut self, index: usize) {
        if self.page.screen != Screen::Home {
            return;
        }
        if let Some(item) = self.page.items.get(index) {
            self.description = item.description.clone().unwrap_or_default();
        }
    }
}
