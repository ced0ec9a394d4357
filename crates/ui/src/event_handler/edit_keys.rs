use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termfolio_core::InputState;

/// Apply a line-editing key; returns whether the key was consumed
pub(super) fn handle_edit_keys(event: &KeyEvent, input: &mut InputState) -> bool {
    match event.code {
        KeyCode::Backspace => {
            input.reset_history_navigation();
            input.backspace();
        }
        KeyCode::Delete => {
            input.reset_history_navigation();
            input.delete();
        }
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char('u') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            input.reset_history_navigation();
            input.clear();
        }
        KeyCode::Char(c) if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            input.reset_history_navigation();
            input.insert_char(c);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_edit_keys() {
        let mut input = InputState::new();
        assert!(handle_edit_keys(&key(KeyCode::Char('a')), &mut input));
        assert!(handle_edit_keys(&KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT), &mut input));
        assert_eq!(input.buffer, "aB");

        handle_edit_keys(&key(KeyCode::Home), &mut input);
        handle_edit_keys(&key(KeyCode::Delete), &mut input);
        assert_eq!(input.buffer, "B");

        handle_edit_keys(&key(KeyCode::End), &mut input);
        handle_edit_keys(&key(KeyCode::Backspace), &mut input);
        assert_eq!(input.buffer, "");
    }

    #[test]
    fn test_typing_leaves_history_navigation() {
        let mut input = InputState::new();
        input.recall_previous(&["help"]);
        assert!(input.is_navigating_history());

        handle_edit_keys(&key(KeyCode::Char('!')), &mut input);
        assert!(!input.is_navigating_history());
        assert_eq!(input.buffer, "help!");
    }

    #[test]
    fn test_ctrl_u_clears_and_alt_ignored() {
        let mut input = InputState::new();
        input.set("whereis socials");
        assert!(!handle_edit_keys(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT), &mut input));
        assert!(handle_edit_keys(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut input));
        assert_eq!(input.buffer, "");
    }

    #[test]
    fn test_unhandled_key() {
        let mut input = InputState::new();
        assert!(!handle_edit_keys(&key(KeyCode::F(5)), &mut input));
    }
}
