//! Configuration commands.

use std::io::Write;

use zpush_caldav_config::CalDavBackendConfig;

use crate::error::{CliError, CliResult};
use crate::location::ConfigLocation;

/// Print the configuration under its persisted key names.
pub fn dump(
    config: &CalDavBackendConfig,
    location: &ConfigLocation,
    json: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    let persisted = config.persisted();
    if json {
        let rendered =
            serde_json::to_string_pretty(&persisted).map_err(|e| CliError::render("JSON", e))?;
        writeln!(out, "{}", rendered)?;
    } else {
        let rendered = toml::to_string(&persisted).map_err(|e| CliError::render("TOML", e))?;
        writeln!(out, "# {}", location)?;
        write!(out, "{}", rendered)?;
    }
    Ok(())
}

/// Report that the configuration is valid, with a short summary.
///
/// Invalid configurations never reach this point; loading already failed.
pub fn validate(config: &CalDavBackendConfig, out: &mut impl Write) -> CliResult<()> {
    if config.port().is_symbolic() {
        writeln!(
            out,
            "Port {} is symbolic and is resolved at startup.",
            config.port()
        )?;
    }
    if config.max_sync_period().is_unbounded() {
        writeln!(out, "Sync period is unbounded.")?;
    }
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show where the configuration is read from.
pub fn path(location: &ConfigLocation, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "config: {}", location)?;
    writeln!(out, "default: {}", crate::location::default_path().display())?;
    Ok(())
}
