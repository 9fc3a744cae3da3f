//! Entry points that produce a [`CalDavBackendConfig`].

use std::path::Path;

use tracing::debug;

use crate::config::CalDavBackendConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::source::SourceFormat;

/// The static definitions shipped with the backend.
pub const BUNDLED_CONFIG: &str = include_str!("../conf/backend_caldav.toml");

/// Loads the bundled static definitions.
///
/// Loading is deterministic: every call yields an equal configuration.
pub fn load() -> ConfigResult<CalDavBackendConfig> {
    debug!("loading bundled CalDAV backend configuration");
    load_str(BUNDLED_CONFIG, SourceFormat::Toml)
}

/// Loads a configuration file, choosing the format from its extension or
/// content.
pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<CalDavBackendConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let format = SourceFormat::detect(path, &content);
    debug!(path = %path.display(), ?format, "loading CalDAV backend configuration");
    load_str(&content, format)
}

/// Loads a configuration from text in the given format.
pub fn load_str(source: &str, format: SourceFormat) -> ConfigResult<CalDavBackendConfig> {
    let entries = format.parse(source)?;
    debug!(entries = entries.len(), "parsed configuration source");
    CalDavBackendConfig::from_entries(&entries)
}
