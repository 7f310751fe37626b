//! `tracefan config` command handler

use std::path::Path;

use tracing::info;

use tracefan_core::config::TracefanConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;

/// Execute the `config` command.
pub async fn execute(args: ConfigArgs, config_path: &Path) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path).await,
        ConfigAction::Show { section } => execute_show(config_path, section).await,
    }
}

/// Attempt to load and validate the configuration file, reporting any errors.
async fn execute_validate(config_path: &Path) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    match TracefanConfig::load(config_path).await {
        Ok(_) => {
            println!("{}: configuration is valid", config_path.display());
            Ok(())
        }
        Err(e) => {
            println!("{}: {}", config_path.display(), e);
            Err(CliError::Config("configuration is invalid".to_owned()))
        }
    }
}

/// Print the effective configuration (file + env overrides + defaults).
async fn execute_show(config_path: &Path, section: Option<String>) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = TracefanConfig::load_or_default(config_path).await?;

    let rendered = match section.as_deref() {
        None => toml::to_string_pretty(&config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("replay") => toml::to_string_pretty(&config.replay),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: general, replay)"
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("serialization error: {e}")))?;

    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("tracefan.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn validate_accepts_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[general]\nlog_level = \"debug\"\n");

        let result = execute_validate(&path).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn validate_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[general]\nlog_format = \"xml\"\n");

        let err = execute_validate(&path).await.unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[tokio::test]
    async fn show_accepts_known_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[replay]\ndecimal_separator = \"comma\"\n");

        assert!(execute_show(&path, None).await.is_ok());
        assert!(execute_show(&path, Some("general".to_owned())).await.is_ok());
        assert!(execute_show(&path, Some("replay".to_owned())).await.is_ok());
    }

    #[tokio::test]
    async fn show_rejects_unknown_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "");

        let err = execute_show(&path, Some("ebpf".to_owned()))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
    }
}
