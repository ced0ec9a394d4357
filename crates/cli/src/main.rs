use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use termfolio_core::commands::{CHAT_PREFIX, CLEAR, GREETINGS, OPEN_CHAT};
use termfolio_core::logging::LoggingConfig;
use termfolio_core::{CommandTable, Config, Profile, ResumeSaver, ResumeSpec, Terminal, TerminalHooks, init_logging};
use termfolio_ui::App;

/// Upper bound on virtual time spent settling a headless command
const EXEC_SETTLE_LIMIT: Duration = Duration::from_secs(60);

/// Termfolio - a portfolio that behaves like a shell
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "An interactive terminal portfolio built in Rust", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to termfolio.toml (default: ./termfolio.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive terminal (default)
    Start,
    /// Run a single command, fast-forward its animation and print the result
    Exec {
        /// Command line, e.g. `cat about.txt`
        #[arg(required = true, value_name = "CMD", trailing_var_arg = true)]
        command: Vec<String>,

        /// Print the transcript entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every command the terminal understands
    Commands,
    /// Write an example configuration file
    Init {
        /// Destination (default: ./termfolio.toml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from("termfolio.toml"));

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Init { path } => cmd_init(&path.unwrap_or(config_path)),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "termfolio", &mut std::io::stdout());
            Ok(())
        }
        Commands::Commands => {
            cmd_commands();
            Ok(())
        }
        Commands::Start => {
            let config = load_config(&config_path, cli.config.is_some())?;
            let _guard = setup_logging(&config, cli.verbose, true)?;
            cmd_start(config, cli.verbose)
        }
        Commands::Exec { command, json } => {
            let config = load_config(&config_path, cli.config.is_some())?;
            let _guard = setup_logging(&config, cli.verbose, false)?;
            cmd_exec(config, &command.join(" "), json)
        }
    }
}

/// Load the config; a missing file is only an error when the path was given explicitly
fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if explicit {
        Config::from_file(path).with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        Config::load_or_default(path).with_context(|| format!("Failed to load config from {}", path.display()))
    }
}

fn load_profile(config: &Config) -> Result<Profile> {
    Profile::load(config.content.profile_path.as_deref()).context("Failed to load portfolio content")
}

fn setup_logging(
    config: &Config, verbose: bool, interactive: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let mut logging = LoggingConfig::from(config.logging.clone());
    if verbose {
        logging = logging.with_level("debug");
    }
    if interactive {
        logging = logging.without_stderr();
    }
    init_logging(Some(logging)).context("Failed to initialize logging")
}

/// Start the interactive terminal
fn cmd_start(config: Config, verbose: bool) -> Result<()> {
    let profile = load_profile(&config)?;
    if verbose {
        println!("{} Portfolio: {}", "Info:".blue().bold(), profile.name.cyan());
        println!("{} Resume source: {}", "Info:".blue().bold(), config.resume.source.display());
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut app = App::new(&config, profile);
    runtime.block_on(app.run()).context("Terminal session failed")?;

    tracing::info!("termfolio exited");
    Ok(())
}

/// Hooks for headless runs: the chat window cannot open, resume saves are reported
#[derive(Debug, Default)]
struct HeadlessHooks {
    saver: Option<ResumeSaver>,
    chat_requested: bool,
    saved: Option<std::result::Result<PathBuf, String>>,
}

impl TerminalHooks for HeadlessHooks {
    fn open_chat(&mut self) {
        self.chat_requested = true;
    }

    fn save_resume(&mut self, resume: &ResumeSpec) {
        if let Some(saver) = &self.saver {
            self.saved = Some(saver.save(resume).map_err(|e| e.to_string()));
        }
    }
}

/// Execute `line` on a fresh terminal and settle every animation
fn exec_headless(config: &Config, profile: Profile, line: &str) -> Result<Terminal<HeadlessHooks>> {
    let hooks = HeadlessHooks { saver: Some(ResumeSaver::from_config(&config.resume)), ..Default::default() };
    let mut terminal = Terminal::new(config, profile, hooks);
    terminal.execute(line);
    if !terminal.run_until_idle(EXEC_SETTLE_LIMIT) {
        anyhow::bail!("'{}' did not finish within {}s", line, EXEC_SETTLE_LIMIT.as_secs());
    }
    Ok(terminal)
}

/// Run one command headless and print what the terminal would show
fn cmd_exec(config: Config, line: &str, json: bool) -> Result<()> {
    let profile = load_profile(&config)?;
    let terminal = exec_headless(&config, profile, line)?;
    let entry = terminal.transcript().last().context("Transcript is empty")?;
    let visible = terminal.visible(entry);

    if json {
        let value = serde_json::json!({
            "command": entry.command_text,
            "response": entry.response,
            "output": visible.plain_lines(),
        });
        println!("{}", serde_json::to_string_pretty(&value).context("Failed to encode entry")?);
        return Ok(());
    }

    println!("{}", visible.plain_text());

    let hooks = terminal.hooks();
    if hooks.chat_requested {
        println!("{} The chat window is only available in the interactive terminal", "Info:".yellow().bold());
    }
    match &hooks.saved {
        Some(Ok(path)) => println!("{} Saved {}", "Success:".green().bold(), path.display()),
        Some(Err(reason)) => println!("{} Could not save resume: {}", "Warning:".yellow().bold(), reason),
        None => {}
    }
    Ok(())
}

fn cmd_commands() {
    println!("{}", "Termfolio Commands".green().bold().underline());
    println!();
    for spec in CommandTable::entries() {
        println!("  {:<36} {}", spec.key.cyan(), spec.summary);
    }
    println!("  {:<36} {}", CLEAR.cyan(), "Clear the terminal");
    println!("  {:<36} {}", OPEN_CHAT[0].cyan(), "Open the chat window");
    println!("  {:<36} {}", format!("{}<message>", CHAT_PREFIX).cyan(), "Send a message to the chat companion");
    println!("  {:<36} {}", GREETINGS.join(" | ").cyan(), "Say hello");
}

/// Write the example config, refusing to clobber an existing file
fn cmd_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, Config::example()).context("Failed to write config")?;
    println!("{} Created config at {}", "Success:".green().bold(), path.display());
    Ok(())
}
