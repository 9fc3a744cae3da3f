//! Typed, validated configuration for the CalDAV backend.
//!
//! The backend reads seven `CALDAV_*` settings once at startup. This crate
//! parses them from TOML or from the legacy PHP `define()` file, validates
//! every field, and hands back an immutable [`CalDavBackendConfig`].
//!
//! ```ignore
//! use zpush_caldav_config::{load, EnvPortBinding};
//!
//! let config = load()?;
//! let url = config.calendar_url("alice", &EnvPortBinding)?;
//! ```

mod config;
pub mod error;
pub mod keys;
mod loader;
mod path;
mod personal;
mod port;
mod protocol;
pub mod source;
mod sync_period;
mod value;

pub use config::{CalDavBackendConfig, Persisted};
pub use error::{ConfigError, ConfigResult};
pub use loader::{BUNDLED_CONFIG, load, load_from, load_str};
pub use path::{PathTemplate, USERNAME_PLACEHOLDER};
pub use personal::{PRINCIPAL, PersonalMode};
pub use port::{EnvPortBinding, MapPortBinding, PortBinding, PortSpec};
pub use protocol::Protocol;
pub use source::SourceFormat;
pub use sync_period::MaxSyncPeriod;
pub use value::{RawEntries, RawValue};
