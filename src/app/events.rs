//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, Mode};

/// Handle a key event
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if state.mode == Mode::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
            state.mode = Mode::Normal;
        }
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => state.mode = Mode::Help,
        (_, KeyCode::Char('t')) => {
            state.next_theme();
            state.set_status(format!("Theme: {}", state.theme.name()));
        }
        (_, KeyCode::Char('j') | KeyCode::Down) => state.select_next(),
        (_, KeyCode::Char('k') | KeyCode::Up) => state.select_prev(),
        (_, KeyCode::Char('g') | KeyCode::Home) => state.select_first(),
        (_, KeyCode::Char('G') | KeyCode::End) => state.select_last(),
        (_, KeyCode::PageDown) | (KeyModifiers::CONTROL, KeyCode::Char('d')) => state.page_down(),
        (_, KeyCode::PageUp) | (KeyModifiers::CONTROL, KeyCode::Char('u')) => state.page_up(),
        _ => {}
    }

    // Any navigation clears a stale status message
    if !matches!(key.code, KeyCode::Char('t')) {
        state.status.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::images::placeholder::pokeball;
    use crate::models::catalog;

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn state() -> AppState {
        let mut state = AppState::new(Config::default(), catalog(), pokeball(8));
        state.set_visible_rows(4);
        state
    }

    #[test]
    fn test_navigation_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Down);
        assert_eq!(state.selected, 2);
        press(&mut state, KeyCode::Char('G'));
        assert_eq!(state.selected, 10);
        press(&mut state, KeyCode::Char('g'));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.mode, Mode::Help);
        press(&mut state, KeyCode::Char('q'));
        assert!(!state.should_quit);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn test_theme_sets_status() {
        let mut state = state();
        press(&mut state, KeyCode::Char('t'));
        assert!(state.status.starts_with("Theme: "));
        press(&mut state, KeyCode::Char('j'));
        assert!(state.status.is_empty());
    }
}
