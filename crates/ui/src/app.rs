mod event_loop;
mod rendering;

pub use rendering::render;

use crate::chat::{ChatResponder, OfflineResponder};
use crate::event_handler::{EventHandler, KeyAction};
use crate::state::UiState;

use crossterm::event::Event;
use ratatui::{Terminal as TuiTerminal, backend::CrosstermBackend};
use std::time::Duration;
use termfolio_core::{Config, Profile, ResumeSaver, ResumeSpec, Terminal, TerminalHooks};
use tokio_util::sync::CancellationToken;

/// Terminal hooks as seen by the TUI
///
/// Chat requests are latched for the app loop to pick up; resume saves go
/// straight to disk and leave a notice for the footer.
#[derive(Debug, Default)]
pub struct UiHooks {
    saver: Option<ResumeSaver>,
    chat_requested: bool,
    notice: Option<String>,
}

impl UiHooks {
    pub fn new(saver: Option<ResumeSaver>) -> Self {
        Self { saver, chat_requested: false, notice: None }
    }

    pub fn take_chat_request(&mut self) -> bool {
        std::mem::take(&mut self.chat_requested)
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

impl TerminalHooks for UiHooks {
    fn open_chat(&mut self) {
        self.chat_requested = true;
    }

    fn save_resume(&mut self, resume: &ResumeSpec) {
        let Some(saver) = &self.saver else {
            tracing::debug!("no resume source configured, skipping save");
            return;
        };
        self.notice = Some(match saver.save(resume) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "resume save failed");
                format!("Could not save resume: {}", e)
            }
        });
    }
}

/// Main TUI application
///
/// Owns the interpreter plus the presentation state around it.
pub struct App {
    terminal: Terminal<UiHooks>,
    state: UiState,
    responder: Box<dyn ChatResponder>,
    scroll_step: usize,
    viewport_rows: usize,
    pub cancel_token: CancellationToken,
}

impl App {
    pub fn new(config: &Config, profile: Profile) -> Self {
        let hooks = UiHooks::new(Some(ResumeSaver::from_config(&config.resume)));
        Self {
            terminal: Terminal::new(config, profile, hooks),
            state: UiState::new(),
            responder: Box::new(OfflineResponder),
            scroll_step: config.scroll.step_rows.max(1),
            viewport_rows: 0,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Swap the chat companion's brain
    pub fn with_responder(mut self, responder: Box<dyn ChatResponder>) -> Self {
        self.responder = responder;
        self
    }

    pub fn terminal(&self) -> &Terminal<UiHooks> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<UiHooks> {
        &mut self.terminal
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Some(action) = EventHandler::handle_event(event, &mut self.state, self.terminal.input_mut()) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: KeyAction) {
        tracing::trace!(?action, "key action");
        match action {
            KeyAction::Submit => self.terminal.submit(),
            KeyAction::RecallPrevious => {
                self.terminal.recall_previous();
            }
            KeyAction::RecallNext => {
                self.terminal.recall_next();
            }
            KeyAction::ScrollLines { up } => self.scroll_by(self.scroll_step, up),
            KeyAction::ScrollPage { up } => self.scroll_by(self.viewport_rows.max(1), up),
            KeyAction::ScrollToTop => self.terminal.scroll_mut().scroll_to(0),
            KeyAction::ScrollToBottom => self.terminal.scroll_mut().scroll_to(usize::MAX),
            KeyAction::Trigger { command } => self.terminal.trigger(&command),
            KeyAction::Activate { command } => self.terminal.activate(&command),
            KeyAction::SendChat => {
                self.state.chat.send(self.responder.as_mut());
            }
            KeyAction::CloseChat => self.state.close_chat(),
            KeyAction::Exit => {
                self.state.should_exit = true;
                self.cancel_token.cancel();
            }
        }
        self.sync_hooks();
    }

    fn scroll_by(&mut self, rows: usize, up: bool) {
        let delta = rows.min(isize::MAX as usize) as isize;
        self.terminal.scroll_mut().on_user_scroll(if up { -delta } else { delta });
    }

    /// Advance animations by real elapsed time
    pub fn tick(&mut self, elapsed: Duration) {
        self.terminal.advance(elapsed);
        self.sync_hooks();
    }

    fn sync_hooks(&mut self) {
        let hooks = self.terminal.hooks_mut();
        let open_chat = hooks.take_chat_request();
        if let Some(notice) = hooks.take_notice() {
            self.state.notice = Some(notice);
        }
        if open_chat {
            self.state.open_chat();
        }
    }

    pub fn draw(&mut self, terminal: &mut TuiTerminal<CrosstermBackend<std::io::Stdout>>) -> std::io::Result<()> {
        rendering::draw(self, terminal)
    }

    /// Run the TUI until the visitor quits
    pub async fn run(&mut self) -> std::io::Result<()> {
        event_loop::run(self).await
    }
}
