//! Where the configuration comes from.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use zpush_caldav_config::CalDavBackendConfig;

use crate::error::CliResult;

/// File name looked up in the user's configuration directory.
pub const CONFIG_FILE_NAME: &str = "backend_caldav.toml";

/// Source the CLI loads the configuration from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// A file on disk.
    File(PathBuf),
    /// The definitions compiled into the binary.
    Bundled,
}

impl ConfigLocation {
    /// Picks the explicit path if given, then the default path if it
    /// exists, then the bundled definitions.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with_default(explicit, &default_path())
    }

    fn resolve_with_default(explicit: Option<&Path>, default: &Path) -> Self {
        if let Some(path) = explicit {
            Self::File(path.to_path_buf())
        } else if default.is_file() {
            Self::File(default.to_path_buf())
        } else {
            Self::Bundled
        }
    }

    pub fn load(&self) -> CliResult<CalDavBackendConfig> {
        debug!(location = %self, "loading configuration");
        let config = match self {
            Self::File(path) => zpush_caldav_config::load_from(path)?,
            Self::Bundled => zpush_caldav_config::load()?,
        };
        Ok(config)
    }
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled => f.write_str("<bundled>"),
        }
    }
}

/// Returns the default configuration directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zpush-caldav")
}

/// Returns the default configuration file path.
pub fn default_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let location =
            ConfigLocation::resolve_with_default(Some(Path::new("/x.php")), Path::new("/nope"));
        assert_eq!(location, ConfigLocation::File(PathBuf::from("/x.php")));
    }

    #[test]
    fn existing_default_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&default, zpush_caldav_config::BUNDLED_CONFIG).unwrap();

        let location = ConfigLocation::resolve_with_default(None, &default);
        assert_eq!(location, ConfigLocation::File(default.clone()));
        assert_eq!(location.load().unwrap(), zpush_caldav_config::load().unwrap());
    }

    #[test]
    fn falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let location = ConfigLocation::resolve_with_default(None, &dir.path().join("missing"));
        assert_eq!(location, ConfigLocation::Bundled);
        assert_eq!(location.to_string(), "<bundled>");
        assert!(location.load().is_ok());
    }

    #[test]
    fn default_path_ends_with_file_name() {
        let path = default_path();
        assert!(path.ends_with("zpush-caldav/backend_caldav.toml"));
    }
}
