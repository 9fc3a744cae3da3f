//! How the user's personal calendar is located.

use std::fmt;
use std::str::FromStr;

/// Keyword selecting the principal-based lookup.
pub const PRINCIPAL: &str = "PRINCIPAL";

/// Strategy for resolving the user's personal (default) calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PersonalMode {
    /// The calendar is found through the user's CalDAV principal.
    Principal,
    /// The calendar collection with this name is the personal one.
    Calendar(String),
}

impl PersonalMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Principal => PRINCIPAL,
            Self::Calendar(name) => name.as_str(),
        }
    }

    pub fn is_principal(&self) -> bool {
        matches!(self, Self::Principal)
    }
}

impl fmt::Display for PersonalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("must not be empty".to_string())
        } else if s.eq_ignore_ascii_case(PRINCIPAL) {
            Ok(Self::Principal)
        } else {
            Ok(Self::Calendar(s.to_string()))
        }
    }
}
