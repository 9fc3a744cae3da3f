//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or using the backend configuration.
///
/// Every loader failure is fatal to backend startup; no partially filled
/// configuration is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key is absent from the source.
    #[error("missing required field {key}")]
    MissingField { key: &'static str },

    /// A key holds a value of the wrong type.
    #[error("{key} must be {expected}, found {found}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A key has the right type but an unusable value.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    /// The same key is defined twice in a legacy source.
    #[error("{key} is defined more than once (line {line})")]
    DuplicateField { key: String, line: usize },

    /// A legacy `define()` line could not be parsed.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The TOML source could not be parsed.
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A symbolic port has no binding in the host environment.
    #[error("port variable {name} is not bound")]
    UnresolvedPort { name: String },

    /// A calendar URL was requested for an empty username.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The calendar URL could not be assembled.
    #[error("failed to build calendar URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }

    /// Creates a syntax error for the given 1-based line.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the configuration key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingField { key }
            | Self::InvalidType { key, .. }
            | Self::InvalidValue { key, .. } => Some(*key),
            Self::DuplicateField { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
