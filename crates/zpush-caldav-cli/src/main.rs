//! zpush-caldav CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use zpush_caldav_cli::cli::Cli;
use zpush_caldav_cli::commands;
use zpush_caldav_config::EnvPortBinding;
use zpush_caldav_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.tracing_config()) {
        eprintln!("warning: {}", e);
    }

    let mut stdout = io::stdout().lock();
    match commands::run(cli, &EnvPortBinding, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
