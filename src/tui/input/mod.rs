mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::{self, Context, FocusTarget};

use super::app::App;

use prompt::{handle_prompt, open_prompt};

/// Handle a key event: app-level shortcuts first, then the navigator, then
/// the location prompt if it has focus.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);
    app.status = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('l') if app.prompt.is_none() => {
                open_prompt(app);
                return;
            }
            _ => {}
        }
    }

    let focus = if app.prompt.is_some() {
        FocusTarget::TextInput
    } else {
        FocusTarget::Document
    };
    let outcome = {
        let mut ctx = Context {
            focus,
            layout: &app.layout,
            flags: app.flags.as_mut(),
        };
        nav::handle_key(&mut app.current.nav, key, &mut ctx)
    };

    if !outcome.handled && focus == FocusTarget::TextInput {
        handle_prompt(app, key);
    }
    app.apply(outcome.effects);
}

/// Terminals differ on Shift+letter: some send the uppercase char, some the
/// lowercase one with SHIFT set. Fold the latter into the former.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
