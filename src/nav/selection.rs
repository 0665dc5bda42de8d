use crate::ops::rows::LinkLayout;

use super::{Effect, Navigator};

impl Navigator {
    /// Move the selection to `index`. Out-of-range indices are ignored.
    ///
    /// Clears the previous item's active link, resets link focus, rebuilds
    /// the link rows for the new item and, with `scroll`, asks the host to
    /// center it.
    pub fn select_item(&mut self, index: usize, scroll: bool, layout: &dyn LinkLayout) {
        if index >= self.page.items.len() {
            return;
        }
        tracing::debug!(from = ?self.cursor, to = index, "select item");
        self.link_focus = None;
        self.cursor = Some(index);
        self.update_description(index);
        self.rows = self.build_rows(index, layout);
        if scroll {
            self.emit(Effect::ScrollIntoView { item: index });
        }
    }

    /// Select the item carrying `post_id`, if any.
    pub fn select_item_by_post(&mut self, post_id: &str, scroll: bool, layout: &dyn LinkLayout) {
        if let Some(index) = self.find_post(post_id) {
            self.select_item(index, scroll, layout);
        }
    }

    /// Follow a quote: select the quoted post and scroll to it.
    /// Returns `false` and changes nothing when the post is not on this page.
    pub fn jump_to_quoted_post(&mut self, post_id: &str, layout: &dyn LinkLayout) -> bool {
        if post_id.is_empty() {
            return false;
        }
        match self.find_post(post_id) {
            Some(index) => {
                self.select_item(index, true, layout);
                true
            }
            None => {
                tracing::debug!(post_id, "quoted post not on page");
                false
            }
        }
    }

    /// Recompute the selected item's rows after the layout reflowed. Link
    /// focus is dropped because row membership may have changed.
    pub fn reflow(&mut self, layout: &dyn LinkLayout) {
        if let Some(index) = self.cursor {
            self.link_focus = None;
            self.rows = self.build_rows(index, layout);
        }
    }

    pub(super) fn select_next(&mut self, layout: &dyn LinkLayout) {
        if let Some(cursor) = self.cursor {
            self.select_item(cursor + 1, true, layout);
        }
    }

    pub(super) fn select_prev(&mut self, layout: &dyn LinkLayout) {
        if let Some(prev) = self.cursor.and_then(|c| c.checked_sub(1)) {
            self.select_item(prev, true, layout);
        }
    }

    fn find_post(&self, post_id: &str) -> Option<usize> {
        self.page
            .items
            .iter()
            .position(|item| item.post_id.as_deref() == Some(post_id))
    }
}
