//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tracefan -- replay measurement logs into time-series destinations.
///
/// Use `tracefan <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "tracefan", version, about, long_about = None)]
pub struct Cli {
    /// Path to the tracefan.toml configuration file.
    #[arg(short, long, default_value = "tracefan.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a measurement log and fan it out to destinations.
    Replay(ReplayArgs),
    /// Inspect and validate the configuration.
    Config(ConfigArgs),
}

/// Arguments for the `replay` subcommand.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the measurement log file.
    pub file: PathBuf,

    /// Override the extraction pattern for this run.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Override the decimal separator ("period" or "comma").
    #[arg(long)]
    pub decimal_separator: Option<String>,

    /// Only route measurements whose point equals this name.
    #[arg(long)]
    pub point: Option<String>,

    /// Also export routed measurements to a JSON Lines file.
    #[arg(long, value_name = "PATH")]
    pub jsonl: Option<PathBuf>,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Load the configuration and report whether it is valid.
    Validate,
    /// Print the effective configuration.
    Show {
        /// Only print one section (general, replay).
        #[arg(long)]
        section: Option<String>,
    },
}
