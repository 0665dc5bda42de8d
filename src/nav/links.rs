use crate::model::LinkTarget;
use crate::ops::rows::LinkLayout;

use super::{Effect, Navigator};

/// Focused link, as a (row, column) position in the selected item's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkFocus {
    pub row: usize,
    pub column: usize,
}

const ORIGIN: LinkFocus = LinkFocus { row: 0, column: 0 };

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

impl Navigator {
    /// Move focus to the previous (`delta < 0`) or next row, wrapping.
    ///
    /// From no focus, either direction lands on the first link of the first
    /// row. Otherwise the column in the target row is the link horizontally
    /// nearest to the one currently focused. Returns `false` when the
    /// selected item has no links.
    pub fn move_row(&mut self, delta: isize, layout: &dyn LinkLayout) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let next = match self.link_focus {
            None => ORIGIN,
            Some(focus) => {
                let item = self.cursor.unwrap_or(0);
                let current_left = self
                    .active_link()
                    .and_then(|link| layout.link_position(item, link))
                    .map_or(0.0, |pos| pos.left);
                let row = wrap(focus.row, delta, self.rows.len());

                let mut column = 0;
                let mut best = f32::INFINITY;
                for (i, &link) in self.rows[row].links.iter().enumerate() {
                    let left = layout.link_position(item, link).map_or(0.0, |pos| pos.left);
                    let distance = (left - current_left).abs();
                    if distance < best {
                        best = distance;
                        column = i;
                    }
                }
                LinkFocus { row, column }
            }
        };
        self.focus_link(next);
        true
    }

    /// Move focus to the previous (`delta < 0`) or next link in reading
    /// order. Leaving a row spills into the neighbouring row (wrapping at the
    /// first and last rows): backwards onto its last link, forwards onto its
    /// first. Returns `false` when the selected item has no links.
    pub fn move_column(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let next = match self.link_focus {
            None => ORIGIN,
            Some(focus) => {
                let row_len = self.rows[focus.row].links.len();
                let column = focus.column as isize + delta;
                if column < 0 {
                    let row = wrap(focus.row, -1, self.rows.len());
                    LinkFocus {
                        row,
                        column: self.rows[row].links.len().saturating_sub(1),
                    }
                } else if column as usize >= row_len {
                    LinkFocus {
                        row: wrap(focus.row, 1, self.rows.len()),
                        column: 0,
                    }
                } else {
                    LinkFocus {
                        row: focus.row,
                        column: column as usize,
                    }
                }
            }
        };
        self.focus_link(next);
        true
    }

    /// Follow the focused link: quotes jump within the page, external URLs go
    /// to the host. Returns `false` when nothing is focused.
    pub fn activate_link(&mut self, layout: &dyn LinkLayout) -> bool {
        if self.link_focus.is_none() || self.rows.is_empty() {
            return false;
        }
        let Some(link) = self.active_link() else {
            return true;
        };
        let target = self
            .selected_item()
            .and_then(|item| item.links.get(link))
            .and_then(|link| link.target.clone());

        match target {
            Some(LinkTarget::Quote(post_id)) => {
                self.jump_to_quoted_post(&post_id, layout);
            }
            Some(LinkTarget::External(url)) if !url.is_empty() => {
                self.emit(Effect::OpenExternal(url));
            }
            _ => {}
        }
        true
    }

    /// Move the active mark to `focus`
    fn focus_link(&mut self, focus: LinkFocus) {
        tracing::debug!(row = focus.row, column = focus.column, "focus link");
        self.link_focus = Some(focus);
    }
}
