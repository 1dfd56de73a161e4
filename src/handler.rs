use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::nav::KeyInput;

/// Handle a key event: app commands first, everything else goes to the
/// navigator.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('g') | KeyCode::Home => app.navigator.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.navigator.select_last(),
        KeyCode::Char('~') => app.go_home(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('.') => app.toggle_hidden(),
        KeyCode::Char('w') => app.toggle_watcher(),
        _ => app.handle_navigation(key_input(&key)),
    }
}

/// Translate a key into navigator input.
pub fn key_input(key: &KeyEvent) -> KeyInput {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return KeyInput::Other;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => KeyInput::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => KeyInput::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => KeyInput::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => KeyInput::MoveDown,
        _ => KeyInput::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_map_to_moves() {
        assert_eq!(key_input(&key(KeyCode::Left)), KeyInput::MoveLeft);
        assert_eq!(key_input(&key(KeyCode::Right)), KeyInput::MoveRight);
        assert_eq!(key_input(&key(KeyCode::Up)), KeyInput::MoveUp);
        assert_eq!(key_input(&key(KeyCode::Down)), KeyInput::MoveDown);
    }

    #[test]
    fn vim_keys_map_to_moves() {
        assert_eq!(key_input(&key(KeyCode::Char('h'))), KeyInput::MoveLeft);
        assert_eq!(key_input(&key(KeyCode::Char('l'))), KeyInput::MoveRight);
        assert_eq!(key_input(&key(KeyCode::Char('k'))), KeyInput::MoveUp);
        assert_eq!(key_input(&key(KeyCode::Char('j'))), KeyInput::MoveDown);
    }

    #[test]
    fn enter_and_backspace_navigate() {
        assert_eq!(key_input(&key(KeyCode::Enter)), KeyInput::MoveRight);
        assert_eq!(key_input(&key(KeyCode::Backspace)), KeyInput::MoveLeft);
    }

    #[test]
    fn other_keys_are_other() {
        assert_eq!(key_input(&key(KeyCode::Char('x'))), KeyInput::Other);
        assert_eq!(key_input(&key(KeyCode::Tab)), KeyInput::Other);
        assert_eq!(key_input(&key(KeyCode::F(5))), KeyInput::Other);
    }

    #[test]
    fn modified_keys_are_other() {
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(key_input(&ctrl_j), KeyInput::Other);
        let alt_left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(key_input(&alt_left), KeyInput::Other);
    }
}
