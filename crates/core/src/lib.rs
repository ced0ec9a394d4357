pub mod commands;
pub mod config;
pub mod content;
pub mod download;
pub mod error;
pub mod input;
pub mod logging;
pub mod response;
pub mod resume;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod terminal;
pub mod transcript;

pub use commands::{
    CHAT_REPLY, CommandSpec, CommandTable, HELP_ENTRIES, MENU_COMMANDS, MENU_TIP, Resolution, resolve,
};
pub use config::{Config, ContentConfig, ResumeConfig, ScrollConfig, TerminalConfig, TimingConfig};
pub use content::{Profile, ResumeSpec};
pub use download::{DownloadAnimation, ProgressTick, progress_bar};
pub use error::{ContentError, Error, Result, ResumeError};
pub use input::InputState;
pub use logging::{LogFormat, init_logging};
pub use response::{Block, Inline, ResponseDescriptor, RevealMode, RevealStep, StagedReveal, Tone, TransferKind};
pub use resume::ResumeSaver;
pub use reveal::{BlockReveal, CharReveal, RevealSource, RevealTick};
pub use scheduler::{Owner, Scheduler, TimerId};
pub use scroll::{ScrollCoordinator, ScrollRequest};
pub use terminal::{LOADING_PLACEHOLDER, NoopHooks, Terminal, TerminalHooks, VisibleOutput};
pub use transcript::{EntryId, Transcript, TranscriptEntry};
