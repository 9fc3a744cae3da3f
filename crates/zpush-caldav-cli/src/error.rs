//! CLI error types.

use thiserror::Error;
use zpush_caldav_config::ConfigError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or using the configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rendering output failed.
    #[error("failed to render {output}: {message}")]
    Render {
        output: &'static str,
        message: String,
    },

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a render error.
    pub fn render(output: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Render {
            output,
            message: err.to_string(),
        }
    }
}
