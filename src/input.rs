use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key event means to the round. Only `Type` mutates the typed
/// buffer, so only printable characters and Enter can ever start a fresh
/// round implicitly; arrows, chords, and other non-printables cannot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Type(char),
    Backspace,
    Reset,
    PrevPassage,
    NextPassage,
    Quit,
    Ignored,
}

pub fn action_for(key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    // chords are navigation/shortcut territory, never typed text
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return InputAction::Ignored;
    }

    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Tab => InputAction::Reset,
        KeyCode::Left => InputAction::PrevPassage,
        KeyCode::Right => InputAction::NextPassage,
        KeyCode::Enter => InputAction::Type('\n'),
        KeyCode::Char(c) => InputAction::Type(c),
        _ => InputAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_printable_char_types() {
        assert_eq!(action_for(key(KeyCode::Char('a'))), InputAction::Type('a'));
        assert_eq!(action_for(key(KeyCode::Char(' '))), InputAction::Type(' '));
    }

    #[test]
    fn test_enter_types_newline() {
        assert_eq!(action_for(key(KeyCode::Enter)), InputAction::Type('\n'));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ev), InputAction::Quit);
    }

    #[test]
    fn test_chords_are_ignored() {
        let ctrl = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(action_for(ctrl), InputAction::Ignored);
        assert_eq!(action_for(alt), InputAction::Ignored);
    }

    #[test]
    fn test_non_printables_never_type() {
        for code in [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::F(1),
        ] {
            assert_eq!(action_for(key(code)), InputAction::Ignored);
        }
    }

    #[test]
    fn test_controls() {
        assert_eq!(action_for(key(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(action_for(key(KeyCode::Backspace)), InputAction::Backspace);
        assert_eq!(action_for(key(KeyCode::Tab)), InputAction::Reset);
        assert_eq!(action_for(key(KeyCode::Left)), InputAction::PrevPassage);
        assert_eq!(action_for(key(KeyCode::Right)), InputAction::NextPassage);
    }
}
