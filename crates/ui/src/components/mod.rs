pub mod chat;
pub mod footer;
pub mod header;
pub mod input;
pub mod menu;
pub mod transcript;

pub use chat::ChatView;
pub use footer::Footer;
pub use header::Header;
pub use input::PromptLine;
pub use menu::CommandMenu;
pub use transcript::{RenderedTranscript, TranscriptPane, wrap_lines};
