//! Command-line interface for trajview.
//!
//! Provides scriptable access to recorded trajectories:
//! - `list`: List trajectory groups with block counts
//! - `render`: Export one group as Markdown, text, HTML or JSON
//! - `demo`: Export an evaluation file (upload mode)
//! - `parse`: Print the blocks of a single transcript
//! - `tui`: Browse trajectories interactively

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::model::Outcome;

/// Parse and browse agent execution trajectories.
#[derive(Debug, Parser)]
#[command(name = "trajview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for structured data.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "TRAJVIEW_OUTPUT")]
    pub output: OutputFormat,

    /// Output as JSON (shorthand for -o json).
    #[arg(long, global = true, env = "TRAJVIEW_JSON")]
    pub json: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true, env = "TRAJVIEW_QUIET")]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "TRAJVIEW_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "TRAJVIEW_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "TRAJVIEW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Tab-separated values.
    Tsv,
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List trajectory groups.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Render one trajectory group.
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Render an evaluation file (JSON array or JSON Lines).
    Demo(DemoArgs),

    /// Parse a single transcript file and print its blocks.
    Parse(ParseArgs),

    /// Launch the interactive terminal browser.
    #[command(alias = "ui")]
    Tui(TuiArgs),

    /// View and initialize configuration.
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Trajectory root directory (default from config).
    #[arg(env = "TRAJVIEW_ROOT")]
    pub root: Option<PathBuf>,
}

/// Which group to open.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GroupSelector {
    /// 0-based position of the group in folder order.
    #[arg(short = 'i', long, conflicts_with = "name")]
    pub index: Option<usize>,

    /// Folder name of the group, e.g. `traj3`.
    #[arg(short = 'n', long)]
    pub name: Option<String>,
}

/// Outcome filter for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutcomeArg {
    /// Only `success/` transcripts.
    Success,
    /// Only `failed/` transcripts.
    Failed,
    /// Both, success first.
    All,
}

impl OutcomeArg {
    /// Outcomes selected by this filter.
    #[must_use]
    pub fn outcomes(self) -> &'static [Outcome] {
        match self {
            Self::Success => &[Outcome::Success],
            Self::Failed => &[Outcome::Failed],
            Self::All => &Outcome::ALL,
        }
    }
}

impl From<Outcome> for OutcomeArg {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::Success,
            Outcome::Failed => Self::Failed,
        }
    }
}

/// Export format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    /// Markdown.
    #[value(alias = "md")]
    Markdown,
    /// Plain text.
    #[value(alias = "txt")]
    Text,
    /// Standalone HTML page.
    Html,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Markdown => Self::Markdown,
            ExportFormatArg::Text => Self::Text,
            ExportFormatArg::Html => Self::Html,
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::JsonPretty => Self::JsonPretty,
        }
    }
}

/// Flags shared by the exporting commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportFlags {
    /// Output format (default: from --out extension, then config).
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Write to this file instead of stdout.
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Leave out reasoning blocks.
    #[arg(long)]
    pub no_reasoning: bool,

    /// Leave out untagged text inside function calls.
    #[arg(long)]
    pub no_raw_segments: bool,

    /// Show a unified diff under old_str/new_str pairs.
    #[arg(long)]
    pub diff: bool,

    /// Truncate long text at this many characters.
    #[arg(long, value_name = "CHARS")]
    pub truncate: Option<usize>,

    /// HTML: use the light palette.
    #[arg(long)]
    pub light: bool,
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Trajectory root directory (default from config).
    #[arg(env = "TRAJVIEW_ROOT")]
    pub root: Option<PathBuf>,

    /// Group to render (default: the first).
    #[command(flatten)]
    pub group: GroupSelector,

    /// Which transcripts to include (default from config).
    #[arg(long, value_enum)]
    pub outcome: Option<OutcomeArg>,

    /// Export settings.
    #[command(flatten)]
    pub export: ExportFlags,
}

/// Arguments for the demo command.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Evaluation file.
    pub file: PathBuf,

    /// Document title (default: the file name).
    #[arg(long)]
    pub title: Option<String>,

    /// Export settings.
    #[command(flatten)]
    pub export: ExportFlags,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Transcript file, or `-` for stdin.
    pub file: PathBuf,
}

/// Arguments for the TUI command.
#[derive(Debug, Parser)]
pub struct TuiArgs {
    /// Trajectory root directory (default from config).
    #[arg(env = "TRAJVIEW_ROOT")]
    pub root: Option<PathBuf>,

    /// Group to open first.
    #[command(flatten)]
    pub group: GroupSelector,

    /// Outcome to show first: success or failed (default from config).
    #[arg(long)]
    pub outcome: Option<Outcome>,

    /// Open an evaluation file instead of a trajectory root.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["index", "name"])]
    pub demo: Option<PathBuf>,

    /// Color theme (dark, light).
    #[arg(long)]
    pub theme: Option<String>,

    /// Use ASCII instead of Unicode symbols.
    #[arg(long)]
    pub ascii: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,
    /// Print the user config file path.
    Path,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "trajview", &mut io::stdout());
}

/// Initialize logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Load the layered configuration.
///
/// An explicit `--config` that fails to load is an error; a broken default
/// or project config only produces a warning.
fn load_config(cli: &Cli) -> Result<Config> {
    let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match Config::load_layered(cli.config.as_deref(), &project_dir) {
        Ok(config) => Ok(config),
        Err(e) if cli.config.is_some() => Err(e),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable configuration");
            Ok(Config::default())
        }
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    // `config init` creates the file `--config` names, so it may not exist yet.
    let config = match &cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        })
        | Commands::Completions(_) => Config::default(),
        _ => load_config(&cli)?,
    };

    match &cli.command {
        Commands::List(args) => commands::list::run(&cli, &config, args),
        Commands::Render(args) => commands::render::run(&cli, &config, args),
        Commands::Demo(args) => commands::demo::run(&cli, &config, args),
        Commands::Parse(args) => commands::parse::run(&cli, args),
        Commands::Tui(args) => commands::tui::run(&cli, &config, args),
        Commands::Config(args) => commands::config::run(&cli, &config, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
