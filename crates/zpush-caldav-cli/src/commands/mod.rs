//! Subcommand implementations.
//!
//! Each command writes to the given writer so output can be captured.

pub mod config;
pub mod url;

use std::io::Write;

use zpush_caldav_config::PortBinding;

use crate::cli::{Cli, Command};
use crate::error::CliResult;
use crate::location::ConfigLocation;

/// Runs the parsed command.
///
/// `path` never loads the configuration, so it still answers when the
/// configured file is missing or broken.
pub fn run(cli: Cli, ports: &dyn PortBinding, out: &mut impl Write) -> CliResult<()> {
    let location = ConfigLocation::resolve(cli.config.as_deref());

    match cli.command {
        Command::Path => config::path(&location, out),
        Command::Dump { json } => config::dump(&location.load()?, &location, json, out),
        Command::Validate => config::validate(&location.load()?, out),
        Command::Url { username } => url::url(&location.load()?, &username, ports, out),
    }
}
