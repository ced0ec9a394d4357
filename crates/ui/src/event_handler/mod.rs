mod edit_keys;
mod key_action;

pub use key_action::KeyAction;

use crate::state::{Focus, UiState};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use termfolio_core::InputState;

use self::edit_keys::handle_edit_keys;

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Route any terminal event; `input` is the interpreter's prompt line
    pub fn handle_event(event: Event, state: &mut UiState, input: &mut InputState) -> Option<KeyAction> {
        match event {
            Event::Key(key) => Self::handle_key_event(key, state, input),
            Event::Mouse(mouse) => Self::handle_mouse_event(mouse),
            Event::Paste(text) => {
                match state.focus {
                    Focus::Chat => state.chat.input.insert_str(&text),
                    _ => {
                        state.focus = Focus::Input;
                        input.insert_str(&text);
                    }
                }
                None
            }
            _ => None,
        }
    }

    pub fn handle_key_event(event: KeyEvent, state: &mut UiState, input: &mut InputState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if let Some(action) = Self::handle_global_key(&event, state) {
            return action;
        }

        match state.focus {
            Focus::Input => Self::handle_input_key(event, input),
            Focus::Menu => Self::handle_menu_key(event, state),
            Focus::Links => Self::handle_links_key(event, state),
            Focus::Chat => Self::handle_chat_key(event, state),
        }
    }

    /// Keys that work regardless of focus; `Some(_)` means the key was consumed
    fn handle_global_key(event: &KeyEvent, state: &mut UiState) -> Option<Option<KeyAction>> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some(Some(KeyAction::Exit)),
            KeyCode::Char('l') if ctrl => Some(Some(KeyAction::Trigger { command: "clear".to_string() })),
            KeyCode::Tab | KeyCode::BackTab => {
                state.cycle_focus();
                Some(None)
            }
            KeyCode::PageUp => Some(Some(KeyAction::ScrollPage { up: true })),
            KeyCode::PageDown => Some(Some(KeyAction::ScrollPage { up: false })),
            KeyCode::Home if ctrl => Some(Some(KeyAction::ScrollToTop)),
            KeyCode::End if ctrl => Some(Some(KeyAction::ScrollToBottom)),
            KeyCode::Up if event.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Some(KeyAction::ScrollLines { up: true }))
            }
            KeyCode::Down if event.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Some(KeyAction::ScrollLines { up: false }))
            }
            _ => None,
        }
    }

    fn handle_input_key(event: KeyEvent, input: &mut InputState) -> Option<KeyAction> {
        match event.code {
            KeyCode::Enter => Some(KeyAction::Submit),
            KeyCode::Up => Some(KeyAction::RecallPrevious),
            KeyCode::Down => Some(KeyAction::RecallNext),
            _ => {
                handle_edit_keys(&event, input);
                None
            }
        }
    }

    fn handle_menu_key(event: KeyEvent, state: &mut UiState) -> Option<KeyAction> {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => state.menu_up(),
            KeyCode::Down | KeyCode::Char('j') => state.menu_down(),
            KeyCode::Enter => {
                let command = state.selected_menu_command()?;
                state.focus = Focus::Input;
                return Some(KeyAction::Trigger { command: command.to_string() });
            }
            KeyCode::Esc => state.focus = Focus::Input,
            _ => {}
        }
        None
    }

    fn handle_links_key(event: KeyEvent, state: &mut UiState) -> Option<KeyAction> {
        match event.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => state.link_prev(),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => state.link_next(),
            KeyCode::Enter => {
                let command = state.selected_link()?.to_string();
                return Some(KeyAction::Activate { command });
            }
            KeyCode::Esc => state.focus = Focus::Input,
            _ => {}
        }
        None
    }

    fn handle_chat_key(event: KeyEvent, state: &mut UiState) -> Option<KeyAction> {
        match event.code {
            KeyCode::Enter => Some(KeyAction::SendChat),
            KeyCode::Esc => Some(KeyAction::CloseChat),
            _ => {
                handle_edit_keys(&event, &mut state.chat.input);
                None
            }
        }
    }

    pub fn handle_mouse_event(event: MouseEvent) -> Option<KeyAction> {
        match event.kind {
            MouseEventKind::ScrollUp => Some(KeyAction::ScrollLines { up: true }),
            MouseEventKind::ScrollDown => Some(KeyAction::ScrollLines { up: false }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(state: &mut UiState, input: &mut InputState, event: KeyEvent) -> Option<KeyAction> {
        EventHandler::handle_key_event(event, state, input)
    }

    #[test]
    fn test_typing_and_submit() {
        let mut state = UiState::new();
        let mut input = InputState::new();

        for c in "help".chars() {
            assert_eq!(press(&mut state, &mut input, key(KeyCode::Char(c))), None);
        }
        assert_eq!(input.buffer, "help");
        assert_eq!(press(&mut state, &mut input, key(KeyCode::Enter)), Some(KeyAction::Submit));
    }

    #[test]
    fn test_arrows_recall_history() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        assert_eq!(press(&mut state, &mut input, key(KeyCode::Up)), Some(KeyAction::RecallPrevious));
        assert_eq!(press(&mut state, &mut input, key(KeyCode::Down)), Some(KeyAction::RecallNext));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        let event = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(press(&mut state, &mut input, event), None);
    }

    #[test]
    fn test_ctrl_c_exits_from_any_focus() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        for focus in [Focus::Input, Focus::Menu, Focus::Links, Focus::Chat] {
            state.focus = focus;
            assert_eq!(press(&mut state, &mut input, ctrl('c')), Some(KeyAction::Exit));
        }
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        assert_eq!(
            press(&mut state, &mut input, ctrl('l')),
            Some(KeyAction::Trigger { command: "clear".to_string() })
        );
    }

    #[test]
    fn test_menu_selection_triggers() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        press(&mut state, &mut input, key(KeyCode::Tab));
        assert_eq!(state.focus, Focus::Menu);

        press(&mut state, &mut input, key(KeyCode::Down));
        let action = press(&mut state, &mut input, key(KeyCode::Enter));
        assert_eq!(action, Some(KeyAction::Trigger { command: termfolio_core::MENU_COMMANDS[1].0.to_string() }));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_links_activate_selected_trigger() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        state.set_links(vec!["pwd".to_string(), "cat archives/old_projects.txt".to_string()]);
        state.focus = Focus::Links;

        press(&mut state, &mut input, key(KeyCode::Right));
        assert_eq!(
            press(&mut state, &mut input, key(KeyCode::Enter)),
            Some(KeyAction::Activate { command: "cat archives/old_projects.txt".to_string() })
        );

        press(&mut state, &mut input, key(KeyCode::Esc));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_chat_keys_edit_chat_input() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        state.open_chat();

        press(&mut state, &mut input, key(KeyCode::Char('y')));
        press(&mut state, &mut input, key(KeyCode::Char('o')));
        assert_eq!(state.chat.input.buffer, "yo");
        assert!(input.buffer.is_empty());

        assert_eq!(press(&mut state, &mut input, key(KeyCode::Enter)), Some(KeyAction::SendChat));
        assert_eq!(press(&mut state, &mut input, key(KeyCode::Esc)), Some(KeyAction::CloseChat));
    }

    #[test]
    fn test_scroll_keys() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        assert_eq!(press(&mut state, &mut input, key(KeyCode::PageUp)), Some(KeyAction::ScrollPage { up: true }));
        assert_eq!(
            press(&mut state, &mut input, KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(KeyAction::ScrollLines { up: true })
        );
        assert_eq!(
            press(&mut state, &mut input, KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL)),
            Some(KeyAction::ScrollToBottom)
        );
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let event = MouseEvent { kind: MouseEventKind::ScrollUp, column: 0, row: 0, modifiers: KeyModifiers::empty() };
        assert_eq!(EventHandler::handle_mouse_event(event), Some(KeyAction::ScrollLines { up: true }));
    }

    #[test]
    fn test_paste_goes_to_focused_input() {
        let mut state = UiState::new();
        let mut input = InputState::new();
        EventHandler::handle_event(Event::Paste("cat about.txt".to_string()), &mut state, &mut input);
        assert_eq!(input.buffer, "cat about.txt");

        state.open_chat();
        EventHandler::handle_event(Event::Paste("hello".to_string()), &mut state, &mut input);
        assert_eq!(state.chat.input.buffer, "hello");
    }
}
