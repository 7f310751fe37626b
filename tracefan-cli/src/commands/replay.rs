//! `tracefan replay` command handler

use tracefan_core::config::{DecimalSeparator, ReplayConfig};
use tracefan_replay::{JsonLinesDestination, LogDestination, ReplayPipelineBuilder};

use crate::cli::ReplayArgs;
use crate::error::CliError;

/// Execute the `replay` command.
///
/// Applies per-run overrides on top of the loaded `[replay]` section,
/// registers the log destination (and optionally a JSON Lines export),
/// and runs one parse session over the given file.
pub async fn execute(args: ReplayArgs, mut config: ReplayConfig) -> Result<(), CliError> {
    if let Some(pattern) = args.pattern {
        config.pattern = pattern;
    }
    if let Some(separator) = &args.decimal_separator {
        config.decimal_separator =
            DecimalSeparator::from_str_loose(separator).ok_or_else(|| {
                CliError::Command(format!(
                    "unknown decimal separator '{separator}', expected 'period' or 'comma'"
                ))
            })?;
    }
    let separator = config.decimal_separator;

    let mut log_destination = LogDestination::new().with_separator(separator);
    if let Some(point) = &args.point {
        log_destination = log_destination.with_point_filter(point);
    }

    let mut builder = ReplayPipelineBuilder::new()
        .config(config)
        .destination(Box::new(log_destination));

    if let Some(path) = &args.jsonl {
        let mut jsonl = JsonLinesDestination::new(path);
        if let Some(point) = &args.point {
            jsonl = jsonl.with_point_filter(point);
        }
        builder = builder.destination(Box::new(jsonl));
    }

    let mut pipeline = builder.build()?;
    let summary = pipeline.parse(&args.file).await?;

    println!("Replay finished: {summary}");
    if let Some(path) = &args.jsonl {
        println!("Measurements exported to {}", path.display());
    }

    Ok(())
}
