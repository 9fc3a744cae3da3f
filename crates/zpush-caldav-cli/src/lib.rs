//! Operator CLI for the CalDAV backend configuration.
//!
//! This crate provides the `zpush-caldav` command-line interface.

pub mod cli;
pub mod commands;
pub mod error;
pub mod location;

pub use cli::Cli;
pub use error::{CliError, CliResult};
