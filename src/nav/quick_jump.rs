use crate::model::BoardEntry;
use crate::ops::board_search::rank_boards;

use super::dispatch::KeyClass;
use super::{Effect, Navigator, SessionFlags};

/// Open quick-jump overlay: the typed query and its ranked matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickJump {
    query: String,
    selected: usize,
    matches: Vec<BoardEntry>,
}

impl QuickJump {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Index into [`QuickJump::matches`]; meaningless when there are none
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn matches(&self) -> &[BoardEntry] {
        &self.matches
    }

    pub fn selected_entry(&self) -> Option<&BoardEntry> {
        self.matches.get(self.selected)
    }
}

impl Navigator {
    /// Open the overlay with `first` as the query. Does nothing off the
    /// home screen or when already open.
    pub fn open_quick_jump(&mut self, first: char) {
        if !self.quick_jump_available() || self.quick_jump.is_some() {
            return;
        }
        tracing::debug!(%first, "open quick-jump");
        self.quick_jump = Some(QuickJump {
            query: String::new(),
            selected: 0,
            matches: Vec::new(),
        });
        self.quick_jump_push(first);
    }

    pub fn close_quick_jump(&mut self) {
        if self.quick_jump.take().is_some() {
            tracing::debug!("close quick-jump");
        }
    }

    /// Feed one key to the open overlay. Returns whether it was consumed.
    pub(super) fn quick_jump_key(&mut self, class: KeyClass, flags: &mut dyn SessionFlags) -> bool {
        let Some(qj) = self.quick_jump.as_mut() else {
            return false;
        };
        match class {
            KeyClass::Cancel => self.close_quick_jump(),
            KeyClass::Backspace => self.quick_jump_backspace(),
            KeyClass::Up | KeyClass::Down => {
                let len = qj.matches.len();
                if len > 0 {
                    qj.selected = if class == KeyClass::Up {
                        (qj.selected + len - 1) % len
                    } else {
                        (qj.selected + 1) % len
                    };
                }
            }
            KeyClass::Enter => {
                let target = qj
                    .selected_entry()
                    .map(|e| e.target.clone())
                    .filter(|t| !t.is_empty());
                if let Some(target) = target {
                    tracing::info!(%target, query = %qj.query, "quick-jump navigate");
                    flags.set_quick_jump_navigated();
                    self.emit(Effect::Navigate(target));
                }
            }
            KeyClass::Char { ch, plain: true } => self.quick_jump_push(ch),
            _ => return false,
        }
        true
    }

    fn quick_jump_push(&mut self, ch: char) {
        if let Some(qj) = self.quick_jump.as_mut() {
            qj.query.push(ch);
        }
        self.refresh_quick_jump();
    }

    /// Remove the last query character; an emptied query closes the overlay.
    pub(super) fn quick_jump_backspace(&mut self) {
        let Some(qj) = self.quick_jump.as_mut() else {
            return;
        };
        qj.query.pop();
        if qj.query.is_empty() {
            self.close_quick_jump();
        } else {
            self.refresh_quick_jump();
        }
    }

    fn refresh_quick_jump(&mut self) {
        let Some(qj) = self.quick_jump.as_mut() else {
            return;
        };
        qj.matches = rank_boards(&self.dataset, &qj.query, self.config.max_results)
            .into_iter()
            .cloned()
            .collect();
        if qj.selected >= qj.matches.len() {
            qj.selected = 0;
        }
    }
}
