//! cv-term CLI
//!
//! A personal portfolio rendered as an interactive fake terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use cv_term::config::{AppConfig, EngineConfig};
use cv_term::content::{ContentStore, Section};
use cv_term::logging;
use cv_term::preference::{ThemeMode, default_preference_path};
use cv_term::report::{OutputFormat, format_section};
use cv_term::tui;

#[derive(Parser)]
#[command(name = "cv-term")]
#[command(about = "Personal portfolio rendered as an interactive fake terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log file (default: <cache dir>/cv-term/cv-term.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" (default: $CV_TERM_LOG, else "info")
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive terminal (default)
    Run(RunArgs),

    /// Print one section without animation
    Show {
        /// Section name or menu number (contact, experience, volunteer, education, languages)
        section: String,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormatArg,

        /// Content file to read instead of the built-in CV
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Content file to read instead of the built-in CV
    #[arg(long)]
    content: Option<PathBuf>,

    /// Milliseconds per typed character (0 = instant)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Preference file (default: <config dir>/cv-term/preferences.json)
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Start with this theme instead of the stored one
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Open the terminal right away
    #[arg(long)]
    open: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_file.unwrap_or_else(logging::default_log_path);
    let _guard = match logging::init(&log_path, cli.log_level.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => cmd_run(args),
        Commands::Show { section, format, content } => cmd_show(&section, format.into(), content),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_run(args: RunArgs) -> cv_term::Result<()> {
    let engine = match args.tick_ms {
        Some(ms) => EngineConfig::with_tick(Duration::from_millis(ms)),
        None => EngineConfig::default(),
    };
    let config = AppConfig {
        engine,
        content_path: args.content,
        preference_path: args.preferences.unwrap_or_else(default_preference_path),
        theme_override: args.theme.map(ThemeMode::from),
        open_on_start: args.open,
    };
    tui::run::run(config)
}

fn cmd_show(section: &str, format: OutputFormat, content: Option<PathBuf>) -> cv_term::Result<()> {
    let section: Section = section.parse()?;
    let store = ContentStore::load(content.as_deref())?;
    tracing::info!(%section, ?format, "show");

    let out = format_section(&store, section, format)?;
    match format {
        OutputFormat::Plain => print!("{}", out),
        OutputFormat::Json => println!("{}", out),
    }
    Ok(())
}
