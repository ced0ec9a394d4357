use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for termfolio-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the termfolio terminal
///
/// The interpreter itself never fails: every input has a defined response.
/// These errors cover the ambient edges (configuration, content loading,
/// file I/O and the resume save side effect).
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Profile/content loading errors
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Resume download side effect failed
    #[error("resume error: {0}")]
    Resume(#[from] ResumeError),
}

/// Errors raised while loading the profile content
#[derive(Debug, Error)]
pub enum ContentError {
    /// Profile TOML could not be parsed
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// Profile file does not exist
    #[error("profile not found: {0}")]
    NotFound(PathBuf),
}

/// Errors raised by the resume saver
#[derive(Debug, Error)]
pub enum ResumeError {
    /// The source PDF is missing
    #[error("resume source not found: {0}")]
    SourceMissing(PathBuf),

    /// No writable destination could be resolved
    #[error("no download directory available")]
    NoDestination,

    /// Copying the file failed
    #[error("failed to copy resume to {path}: {reason}")]
    CopyFailed { path: PathBuf, reason: String },
}

impl From<toml::de::Error> for ContentError {
    fn from(err: toml::de::Error) -> Self {
        ContentError::InvalidProfile(err.to_string())
    }
}
