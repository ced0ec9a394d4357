use termfolio_core::MENU_COMMANDS;

use crate::chat::ChatPanel;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Menu,
    /// Embedded command triggers in the transcript
    Links,
    Chat,
}

/// Presentation state that lives outside the interpreter
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub menu_selected: usize,
    /// Command triggers currently on screen, in reading order
    pub links: Vec<String>,
    pub link_selected: usize,
    pub chat: ChatPanel,
    /// Last notice from a side effect (resume save)
    pub notice: Option<String>,
    pub should_exit: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab order: input, menu, links (when any), chat (when open)
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Menu,
            Focus::Menu if !self.links.is_empty() => Focus::Links,
            Focus::Menu | Focus::Links if self.chat.is_open() => Focus::Chat,
            _ => Focus::Input,
        };
    }

    pub fn menu_up(&mut self) {
        self.menu_selected = self.menu_selected.checked_sub(1).unwrap_or(MENU_COMMANDS.len() - 1);
    }

    pub fn menu_down(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % MENU_COMMANDS.len();
    }

    pub fn selected_menu_command(&self) -> Option<&'static str> {
        MENU_COMMANDS.get(self.menu_selected).map(|(command, _)| *command)
    }

    pub fn link_prev(&mut self) {
        if !self.links.is_empty() {
            self.link_selected = self.link_selected.checked_sub(1).unwrap_or(self.links.len() - 1);
        }
    }

    pub fn link_next(&mut self) {
        if !self.links.is_empty() {
            self.link_selected = (self.link_selected + 1) % self.links.len();
        }
    }

    pub fn selected_link(&self) -> Option<&str> {
        self.links.get(self.link_selected).map(String::as_str)
    }

    /// Replace the on-screen trigger list, keeping the selection in range
    pub fn set_links(&mut self, links: Vec<String>) {
        self.links = links;
        if self.link_selected >= self.links.len() {
            self.link_selected = self.links.len().saturating_sub(1);
        }
        if self.links.is_empty() && self.focus == Focus::Links {
            self.focus = Focus::Input;
        }
    }

    pub fn open_chat(&mut self) {
        self.chat.open();
        self.focus = Focus::Chat;
    }

    pub fn close_chat(&mut self) {
        self.chat.close();
        if self.focus == Focus::Chat {
            self.focus = Focus::Input;
        }
    }
}
