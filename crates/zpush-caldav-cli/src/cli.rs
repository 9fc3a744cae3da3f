//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use zpush_caldav_core::{TracingConfig, TracingOutputFormat};

/// zpush-caldav - inspect the CalDAV backend configuration
#[derive(Debug, Parser)]
#[command(name = "zpush-caldav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (.toml or legacy .php)
    #[arg(long, short, env = "ZPUSH_CALDAV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Logging setup selected by `--debug` and `--log-format`.
    pub fn tracing_config(&self) -> TracingConfig {
        let base = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        };
        base.with_format(self.log_format.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the loaded configuration
    Dump {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Load the configuration and report whether it is valid
    Validate,

    /// Print the calendar collection URL for a user
    Url {
        /// Username substituted into the path template
        username: String,
    },

    /// Show where the configuration is read from
    Path,
}
