//! Names of the configuration entries.
//!
//! These names are shared with existing backends and must not change.

pub const PROTOCOL: &str = "CALDAV_PROTOCOL";
pub const SERVER: &str = "CALDAV_SERVER";
pub const PORT: &str = "CALDAV_PORT";
pub const PATH: &str = "CALDAV_PATH";
pub const PERSONAL: &str = "CALDAV_PERSONAL";
pub const SUPPORTS_SYNC: &str = "CALDAV_SUPPORTS_SYNC";
pub const MAX_SYNC_PERIOD: &str = "CALDAV_MAX_SYNC_PERIOD";

/// Every required key, in declaration order.
pub const ALL: [&str; 7] = [
    PROTOCOL,
    SERVER,
    PORT,
    PATH,
    PERSONAL,
    SUPPORTS_SYNC,
    MAX_SYNC_PERIOD,
];

/// Returns true if `key` is one of the backend's entries.
pub fn is_known(key: &str) -> bool {
    ALL.contains(&key)
}
