/// Actions that can be triggered by key and mouse events
///
/// Line editing and selection movement are applied in place by the handler;
/// only what needs the interpreter or the app loop becomes an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute the prompt line
    Submit,
    /// Recall an older command into the prompt
    RecallPrevious,
    /// Recall a newer command, or clear the prompt past the newest
    RecallNext,
    /// Scroll the transcript by the configured step
    ScrollLines { up: bool },
    /// Scroll the transcript by one viewport
    ScrollPage { up: bool },
    ScrollToTop,
    ScrollToBottom,
    /// Run a command from the side menu
    Trigger { command: String },
    /// Run the command behind an embedded trigger
    Activate { command: String },
    /// Send the chat panel's composed message
    SendChat,
    CloseChat,
    Exit,
}
