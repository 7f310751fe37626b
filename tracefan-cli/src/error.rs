//! CLI error type with process exit-code mapping.

use tracefan_core::error::TracefanError;
use tracefan_replay::ReplayError;

/// Errors surfaced to the command-line user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command usage or arguments.
    #[error("{0}")]
    Command(String),

    /// Replay session failure.
    #[error("replay error: {0}")]
    Replay(String),

    /// Core library error.
    #[error("{0}")]
    Core(#[from] TracefanError),

    /// I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Replay(_) | Self::Core(_) => 1,
            Self::Config(_) => 2,
            Self::Command(_) => 3,
            Self::Io(_) => 10,
        }
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e.to_string())
    }
}
