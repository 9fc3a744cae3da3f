//! Upper bound on the incremental sync window.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Maximum sync window in seconds.
///
/// The value is kept exactly as configured. `i32::MAX` is the sentinel for
/// "unbounded" that existing consumers compare against literally, so it is
/// never mapped to a native infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MaxSyncPeriod(i32);

impl MaxSyncPeriod {
    pub const UNBOUNDED: Self = Self(i32::MAX);

    /// Wraps a non-negative number of seconds.
    pub fn from_secs(secs: i64) -> Result<Self, String> {
        if secs < 0 {
            return Err(format!("{} is negative", secs));
        }
        i32::try_from(secs)
            .map(Self)
            .map_err(|_| format!("{} exceeds {}", secs, i32::MAX))
    }

    /// The configured value, bit-exact.
    pub fn get(self) -> i32 {
        self.0
    }

    pub fn is_unbounded(self) -> bool {
        self == Self::UNBOUNDED
    }

    /// The window as a duration, or `None` when unbounded.
    pub fn as_duration(self) -> Option<Duration> {
        if self.is_unbounded() {
            None
        } else {
            Some(Duration::from_secs(self.0.unsigned_abs().into()))
        }
    }
}

impl fmt::Display for MaxSyncPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
