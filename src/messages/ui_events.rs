//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Table navigation
    NextRow,
    PrevRow,
    ToggleShowAll,

    // Details dialog
    ViewChild,
    CloseDialog,
    Contribute,

    // Data
    Refresh,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on what is on screen
pub fn key_to_ui_event(key: KeyEvent, dialog_open: bool, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if dialog_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('x') => Some(UiEvent::CloseDialog),
            KeyCode::Char('c') => Some(UiEvent::Contribute),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextRow),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevRow),
        KeyCode::Enter | KeyCode::Char('v') => Some(UiEvent::ViewChild),
        KeyCode::Char('m') => Some(UiEvent::ToggleShowAll),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_table_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Down), false, false), Some(UiEvent::NextRow));
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), false, false), Some(UiEvent::ViewChild));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('m')), false, false), Some(UiEvent::ToggleShowAll));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('c')), false, false), None);
    }

    #[test]
    fn test_dialog_captures_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Esc), true, false), Some(UiEvent::CloseDialog));
        assert_eq!(key_to_ui_event(press(KeyCode::Char('c')), true, false), Some(UiEvent::Contribute));
        assert_eq!(key_to_ui_event(press(KeyCode::Down), true, false), None);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        assert_eq!(key_to_ui_event(press(KeyCode::Char('z')), false, true), Some(UiEvent::CloseHelp));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, true, true), Some(UiEvent::Quit));
    }
}
