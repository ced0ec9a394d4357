use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Number of staged download transitions before the progress bar starts
pub const DOWNLOAD_STAGES: usize = 5;

/// Terminal chrome and welcome banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TerminalConfig {
    /// Title shown in the window header
    pub prompt: String,
    /// First line of the welcome entry
    pub welcome_title: String,
    /// Remaining welcome lines (muted)
    pub welcome_lines: Vec<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "visitor@n33lsterminal ~ %".to_string(),
            welcome_title: "Welcome to n33l's Portfolio".to_string(),
            welcome_lines: vec![
                "Type 'help' to see available commands".to_string(),
                "Or pick a command from the menu on the left ←".to_string(),
            ],
        }
    }
}

/// Animation and deferral timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TimingConfig {
    /// Interval between sequential block reveals
    pub block_interval_ms: u64,
    /// Delay before non-text content appears in a typewriter step
    pub opaque_reveal_ms: u64,
    /// Deferral between a greeting and the chat-open callback
    pub chat_redirect_ms: u64,
    /// Delay before the forced scroll that follows a submission
    pub settle_scroll_ms: u64,
    /// Per-stage delays of the download transcript
    pub download_stage_ms: [u64; DOWNLOAD_STAGES],
    /// Progress bar tick interval
    pub progress_tick_ms: u64,
    /// Percentage added on every progress tick
    pub progress_step: u8,
    /// Delay between 100% and the completion message
    pub download_complete_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            block_interval_ms: 300,
            opaque_reveal_ms: 100,
            chat_redirect_ms: 1000,
            settle_scroll_ms: 50,
            download_stage_ms: [300, 500, 400, 300, 100],
            progress_tick_ms: 30,
            progress_step: 2,
            download_complete_ms: 200,
        }
    }
}

impl TimingConfig {
    pub fn block_interval(&self) -> Duration {
        Duration::from_millis(self.block_interval_ms)
    }

    pub fn opaque_reveal(&self) -> Duration {
        Duration::from_millis(self.opaque_reveal_ms)
    }

    pub fn chat_redirect(&self) -> Duration {
        Duration::from_millis(self.chat_redirect_ms)
    }

    pub fn settle_scroll(&self) -> Duration {
        Duration::from_millis(self.settle_scroll_ms)
    }

    /// Delay spent in `stage` before advancing to the next one
    pub fn download_stage(&self, stage: usize) -> Option<Duration> {
        self.download_stage_ms.get(stage).map(|ms| Duration::from_millis(*ms))
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn download_complete(&self) -> Duration {
        Duration::from_millis(self.download_complete_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.block_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("timing.block_interval_ms").into());
        }
        if self.progress_tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("timing.progress_tick_ms").into());
        }
        if self.progress_step == 0 || self.progress_step > 100 {
            return Err(ConfigError::InvalidProgressStep(self.progress_step).into());
        }
        Ok(())
    }
}

/// Auto-follow behaviour of the output pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScrollConfig {
    /// Rows from the bottom that still count as "at the bottom"
    pub near_bottom_rows: usize,
    /// Rows moved per scroll-wheel or arrow step
    pub step_rows: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { near_bottom_rows: 3, step_rows: 3 }
    }
}

/// Where portfolio content comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ContentConfig {
    /// Custom profile TOML; the built-in profile is used when unset
    pub profile_path: Option<PathBuf>,
}

/// Resume download side effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ResumeConfig {
    /// Local PDF copied when the download animation completes
    pub source: PathBuf,
    /// Destination directory (defaults to the user's downloads dir)
    pub output_dir: Option<PathBuf>,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self { source: PathBuf::from("resume.pdf"), output_dir: None }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Filter directive for stderr output
    pub level: String,
    /// `pretty`, `json` or `compact`
    pub format: String,
    /// Rolling file sink
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "pretty".to_string(), file: FileLoggingConfig::default() }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub level: String,
    /// Log directory (defaults to `~/.termfolio/logs`)
    pub dir: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: "debug".to_string(), dir: None }
    }
}

/// Root configuration structure for termfolio.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub terminal: TerminalConfig,
    pub timing: TimingConfig,
    pub scroll: ScrollConfig,
    pub content: ContentConfig,
    pub resume: ResumeConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.timing.validate()
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# termfolio configuration
# Every key is optional; the values below are the defaults.

[terminal]
prompt = "visitor@n33lsterminal ~ %"
welcome_title = "Welcome to n33l's Portfolio"
welcome_lines = [
    "Type 'help' to see available commands",
    "Or pick a command from the menu on the left ←",
]

# All timings are in milliseconds
[timing]
block_interval_ms = 300
opaque_reveal_ms = 100
chat_redirect_ms = 1000
settle_scroll_ms = 50
download_stage_ms = [300, 500, 400, 300, 100]
progress_tick_ms = 30
progress_step = 2
download_complete_ms = 200

[scroll]
near_bottom_rows = 3
step_rows = 3

[content]
# profile_path = "/path/to/profile.toml"

[resume]
source = "resume.pdf"
# output_dir = "/path/to/Downloads"

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"
# dir = "/path/to/logs"
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A periodic timing was set to zero
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    /// Progress step outside 1..=100
    #[error("timing.progress_step must be between 1 and 100, got {0}")]
    InvalidProgressStep(u8),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_example_matches_defaults() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.timing.block_interval_ms, 300);
        assert_eq!(config.scroll.near_bottom_rows, 3);
        assert_eq!(config.terminal.prompt, "visitor@n33lsterminal ~ %");
        assert!(config.content.profile_path.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
[timing]
progress_step = 5
download_stage_ms = [10, 10, 10, 10, 10]
"#,
        )
        .unwrap();

        assert_eq!(config.timing.progress_step, 5);
        assert_eq!(config.timing.download_stage(4), Some(Duration::from_millis(10)));
        assert_eq!(config.timing.download_stage(5), None);
        assert_eq!(config.timing.progress_tick_ms, 30);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml_str("[timing]\nwarp_speed = 9\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_progress_step_rejected() {
        let err = Config::from_toml_str("[timing]\nprogress_step = 0\n").unwrap_err();
        assert!(err.to_string().contains("progress_step"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Config::from_toml_str("[timing]\nblock_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("block_interval_ms"));
    }

    #[test]
    fn test_timing_durations() {
        let timing = TimingConfig::default();
        assert_eq!(timing.block_interval(), Duration::from_millis(300));
        assert_eq!(timing.opaque_reveal(), Duration::from_millis(100));
        assert_eq!(timing.chat_redirect(), Duration::from_secs(1));
        assert_eq!(timing.settle_scroll(), Duration::from_millis(50));
        assert_eq!(timing.progress_tick(), Duration::from_millis(30));
        assert_eq!(timing.download_complete(), Duration::from_millis(200));
        assert_eq!(timing.download_stage(0), Some(Duration::from_millis(300)));
        assert_eq!(timing.download_stage(1), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scroll]\nnear_bottom_rows = 7").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.scroll.near_bottom_rows, 7);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_logging_section() {
        let config = Config::from_toml_str(
            r#"
[logging]
level = "debug"
format = "json"

[logging.file]
enabled = true
"#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.file.enabled);
        assert_eq!(config.logging.file.level, "debug");
    }
}
