//! tracefan binary entry point.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;

use tracefan_core::config::{GeneralConfig, TracefanConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(args: Cli) -> Result<(), CliError> {
    match args.command {
        Commands::Config(config_args) => {
            // The config command reports on the file itself, so logging
            // cannot depend on loading it first.
            let general = GeneralConfig {
                log_level: args.log_level.unwrap_or_else(|| "info".to_owned()),
                ..GeneralConfig::default()
            };
            logging::init_tracing(&general).map_err(|e| CliError::Command(e.to_string()))?;

            commands::config::execute(config_args, &args.config).await
        }
        Commands::Replay(replay_args) => {
            let mut config = TracefanConfig::load_or_default(&args.config).await?;
            if let Some(level) = args.log_level {
                config.general.log_level = level;
            }
            logging::init_tracing(&config.general).map_err(|e| CliError::Command(e.to_string()))?;

            tracing::info!(config = %args.config.display(), "tracefan starting");
            commands::replay::execute(replay_args, config.replay).await
        }
    }
}
