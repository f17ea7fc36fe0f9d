use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rewind_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "rewind")]
#[command(author, version, about = "Find the start time: an animated elapsed-time subtraction trainer")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: InputArgs,

    /// Use this config file instead of ~/.config/rewind/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Finish time and duration overrides
#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Finish time as HH:MM, or "now" for the local time
    #[arg(short, long)]
    end: Option<String>,
    /// Minutes to go back
    #[arg(short, long, allow_negative_numbers = true)]
    duration: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI (default)
    Run(InputArgs),
    /// Print the start time and the step-by-step solution
    Solve {
        #[command(flatten)]
        inputs: InputArgs,
        /// Print the explanation trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a rewind against a simulated clock and print every frame
    Trace {
        #[command(flatten)]
        inputs: InputArgs,
        /// Frames per second of the simulated clock
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    // These work even when the existing file does not parse
    match &cli.command {
        Some(Commands::Config {
            action: ConfigAction::Init { force },
        }) => return commands::config::init(&config_path, *force),
        Some(Commands::Config {
            action: ConfigAction::Path,
        }) => {
            commands::config::path(&config_path);
            return Ok(());
        }
        _ => {}
    }

    // Load configuration
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let is_tui = matches!(cli.command, None | Some(Commands::Run(_)));
    init_logging(&config, is_tui)?;
    info!(path = %config_path.display(), "Loaded configuration");

    let config = Arc::new(config);

    // Handle commands
    match cli.command {
        None => commands::run::run(config, cli.run),
        Some(Commands::Run(inputs)) => commands::run::run(config, inputs),
        Some(Commands::Solve { inputs, json }) => commands::solve::run(&config, inputs, json),
        Some(Commands::Trace { inputs, fps }) => commands::trace::run(&config, inputs, fps),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { .. } | ConfigAction::Path => Ok(()),
        },
    }
}

/// Initialize logging
///
/// The TUI owns the terminal, so it logs to `<data_dir>/rewind.log`; every
/// other command logs to stderr. `RUST_LOG` wins over `general.log_level`.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
