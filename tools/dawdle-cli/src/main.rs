//! Dawdle CLI: pointer-motion zone detection from the command line.
//!
//! Usage:
//!   dawdle analyze <FILE>     Replay a recorded sample stream
//!   dawdle watch              Analyze live pointer events from stdin
//!   dawdle config             Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dawdle_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "dawdle",
    about = "Detect emotionally charged pointer motion from cursor samples",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as structured JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded JSONL sample stream through the debounced pipeline
    Analyze {
        /// Path to the sample recording
        path: PathBuf,

        /// Inactivity gap that splits actions (ms)
        #[arg(long)]
        action_delay_ms: Option<u64>,

        /// Quiet period before analysis runs (ms)
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Print emitted signals as JSONL instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Read `{"x":..,"y":..}` lines from stdin and emit signals on stdout
    Watch {
        /// History file (defaults to the configured location)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Do not append this session to the history file
        #[arg(long)]
        no_history: bool,

        /// Also record accepted samples to a JSONL file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Show the effective configuration and check it
    Config {
        /// Write the effective configuration to the standard location
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load();

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    dawdle_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Analyze {
            path,
            action_delay_ms,
            debounce_ms,
            json,
        } => {
            if let Some(delay) = action_delay_ms {
                config.analysis.action_delay_ms = delay;
            }
            if let Some(window) = debounce_ms {
                config.analysis.debounce_window_ms = window;
            }
            commands::analyze::run(path, config.analysis, json)
        }
        Commands::Watch {
            history,
            no_history,
            record,
        } => {
            if let Some(path) = history {
                config.history.path = path;
            }
            if no_history {
                config.history.enabled = false;
            }
            commands::watch::run(config, record).await
        }
        Commands::Config { save } => commands::config::run(&config, save),
    }
}
