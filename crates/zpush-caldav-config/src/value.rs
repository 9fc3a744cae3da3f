//! Format-neutral representation of a parsed configuration source.

use std::collections::BTreeMap;
use std::fmt;

/// Key/value pairs read from a source, before any typing or validation.
pub type RawEntries = BTreeMap<String, RawValue>;

/// A single value as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// A value kind the backend never uses (float, array, table, ...).
    Other(&'static str),
}

impl RawValue {
    /// Describes the value kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "a string",
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Other(kind) => *kind,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Other(kind) => write!(f, "<{}>", kind),
        }
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Integer(n) => Self::Int(n),
            toml::Value::Float(_) => Self::Other("a float"),
            toml::Value::Datetime(_) => Self::Other("a datetime"),
            toml::Value::Array(_) => Self::Other("an array"),
            toml::Value::Table(_) => Self::Other("a table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_values_map_to_raw() {
        assert_eq!(
            RawValue::from(toml::Value::String("https".into())),
            RawValue::Str("https".into())
        );
        assert_eq!(
            RawValue::from(toml::Value::Integer(2147483647)),
            RawValue::Int(2147483647)
        );
        assert_eq!(
            RawValue::from(toml::Value::Float(1.5)).kind(),
            "a float"
        );
    }

    #[test]
    fn display_quotes_strings() {
        assert_eq!(RawValue::Str("%u".into()).to_string(), "\"%u\"");
        assert_eq!(RawValue::Bool(false).to_string(), "false");
        assert_eq!(RawValue::Other("an array").to_string(), "<an array>");
    }
}
