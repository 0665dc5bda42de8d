use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::rows::LinkLayout;
use crate::ops::routes::Route;

use super::{Effect, Mode, Navigator, SessionFlags};

/// Where keyboard focus sits in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Document,
    /// A text field; navigation keys belong to it
    TextInput,
}

/// Host services a key handler may need
pub struct Context<'a> {
    pub focus: FocusTarget,
    pub layout: &'a dyn LinkLayout,
    pub flags: &'a mut dyn SessionFlags,
}

/// Result of one key: whether it was consumed, and what the host must do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub handled: bool,
    pub effects: Vec<Effect>,
}

/// Keys as the navigator sees them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Backspace,
    /// Esc
    Cancel,
    Up,
    Down,
    Enter,
    /// A printable character; `plain` when no modifier beyond Shift is held
    Char { ch: char, plain: bool },
    Other,
}

pub fn classify(key: &KeyEvent) -> KeyClass {
    match key.code {
        KeyCode::Backspace => KeyClass::Backspace,
        KeyCode::Esc => KeyClass::Cancel,
        KeyCode::Up => KeyClass::Up,
        KeyCode::Down => KeyClass::Down,
        KeyCode::Enter => KeyClass::Enter,
        KeyCode::Char(ch) => KeyClass::Char {
            ch,
            plain: key.modifiers.difference(KeyModifiers::SHIFT).is_empty(),
        },
        _ => KeyClass::Other,
    }
}

/// Handle one key press against the navigator.
///
/// Text inputs keep their keys. Otherwise `h` goes home and Backspace edits
/// the overlay or goes back; on the home screen printable keys open (and
/// then feed) quick-jump; everything else moves the selection or link focus.
pub fn handle_key(nav: &mut Navigator, key: KeyEvent, ctx: &mut Context<'_>) -> Outcome {
    if ctx.focus == FocusTarget::TextInput {
        return Outcome::default();
    }
    let class = classify(&key);

    let handled = match (nav.mode(), class) {
        (_, KeyClass::Char { ch: 'h' | 'H', .. }) => {
            nav.emit(Effect::Navigate(Route::Home.to_string()));
            true
        }
        (Mode::OverlayOpen, KeyClass::Backspace) => {
            nav.quick_jump_backspace();
            true
        }
        (_, KeyClass::Backspace) if !nav.screen().is_home() => {
            nav.emit(Effect::GoBack);
            true
        }
        (_, KeyClass::Backspace) => false,
        (Mode::OverlayOpen, class) => nav.quick_jump_key(class, ctx.flags),
        (_, KeyClass::Char { ch, plain: true }) if nav.quick_jump_available() => {
            nav.open_quick_jump(ch);
            true
        }
        (_, class) => nav.browse_key(class, ctx.layout),
    };

    Outcome {
        handled,
        effects: nav.take_effects(),
    }
}

impl Navigator {
    fn browse_key(&mut self, class: KeyClass, layout: &dyn LinkLayout) -> bool {
        if self.is_empty() {
            return false;
        }
        match class {
            KeyClass::Down | KeyClass::Char { ch: 'j', .. } => {
                self.select_next(layout);
                true
            }
            KeyClass::Up | KeyClass::Char { ch: 'k', .. } => {
                self.select_prev(layout);
                true
            }
            KeyClass::Enter => {
                let target = self
                    .selected_item()
                    .and_then(|item| item.target.clone())
                    .filter(|t| !t.is_empty());
                match target {
                    Some(target) => {
                        self.emit(Effect::Navigate(target));
                        true
                    }
                    None => false,
                }
            }
            KeyClass::Char { ch: 'w' | 'W', .. } => self.move_row(-1, layout),
            KeyClass::Char { ch: 's' | 'S', .. } => self.move_row(1, layout),
            KeyClass::Char { ch: 'a' | 'A', .. } => self.move_column(-1),
            KeyClass::Char { ch: 'd' | 'D', .. } => self.move_column(1),
            KeyClass::Char { ch: 'e' | 'E', .. } => self.activate_link(layout),
            _ => false,
        }
    }
}
