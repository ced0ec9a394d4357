pub mod app;
pub mod chat;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod state;
pub mod theme;

pub use app::{App, UiHooks};
pub use chat::{ChatPanel, ChatResponder, OfflineResponder};
pub use event_handler::{EventHandler, KeyAction};
pub use state::{Focus, UiState};
pub use theme::Theme;
