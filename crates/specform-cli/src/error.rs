//! CLI error handling.

use thiserror::Error;

use specform_common_config::ConfigError;
use specform_common_log::LogError;

use crate::Exit;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Log(#[from] LogError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{failed} of {total} spec files failed")]
    Failed { failed: usize, total: usize },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::Config(_) => Exit::ConfigError,
            Self::Io(_) => Exit::IoError,
            Self::Failed { .. } => Exit::ValidationError,
            Self::Log(_) | Self::Encode(_) => Exit::GeneralError,
        }
    }
}
