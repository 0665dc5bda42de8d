use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Open the location prompt, seeded with the current page's URL
pub(super) fn open_prompt(app: &mut App) {
    app.prompt = Some(app.page().url.clone());
}

/// Edit the location prompt. Enter navigates to the typed URL, Esc drops it.
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let Some(input) = app.prompt.as_mut() else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.prompt = None;
        }
        (_, KeyCode::Enter) => {
            let url = input.trim().to_string();
            app.prompt = None;
            if !url.is_empty() {
                app.navigate(&url);
            }
        }
        (_, KeyCode::Backspace) => {
            input.pop();
        }
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn open_seeds_current_url() {
        let (_dir, mut app) = test_app("/board/g/catalog");
        open_prompt(&mut app);
        assert_eq!(app.prompt.as_deref(), Some("/board/g/catalog"));
    }

    #[test]
    fn edits_then_navigates() {
        let (_dir, mut app) = test_app("/");
        open_prompt(&mut app);
        handle_prompt(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.prompt.as_deref(), Some(""));
        for c in "/board/g/catalog".chars() {
            handle_prompt(&mut app, key(KeyCode::Char(c)));
        }
        handle_prompt(&mut app, key(KeyCode::Enter));
        assert!(app.prompt.is_none());
        assert_eq!(app.page().url, "/board/g/catalog");
    }

    #[test]
    fn blank_input_does_not_navigate() {
        let (_dir, mut app) = test_app("/");
        app.prompt = Some("   ".into());
        handle_prompt(&mut app, key(KeyCode::Enter));
        assert!(app.prompt.is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn control_chars_are_not_typed() {
        let (_dir, mut app) = test_app("/");
        app.prompt = Some(String::new());
        handle_prompt(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(app.prompt.as_deref(), Some(""));
    }
}
