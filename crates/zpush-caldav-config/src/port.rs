//! Port specification and its deferred resolution.
//!
//! `CALDAV_PORT` is either a literal port number or the name of a variable
//! (such as `HTTPS_PORT`) that the hosting system binds. The loader keeps
//! the name as-is; turning it into a number is a separate step driven by a
//! [`PortBinding`] supplied by the host.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::keys;
use crate::value::RawValue;

static PORT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid port name regex"));

/// Port to connect on, possibly still symbolic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PortSpec {
    Number(u16),
    Symbolic(String),
}

impl PortSpec {
    /// Builds a port from a raw `CALDAV_PORT` value.
    ///
    /// Integers and all-digit strings become [`PortSpec::Number`]; other
    /// strings must look like a variable name.
    pub fn from_raw(value: &RawValue) -> ConfigResult<Self> {
        match value {
            RawValue::Int(n) => parse_port_number(*n).map(Self::Number),
            RawValue::Str(s) => {
                let s = s.trim();
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    let n = s
                        .parse::<i64>()
                        .map_err(|_| ConfigError::invalid_value(keys::PORT, "port out of range"))?;
                    parse_port_number(n).map(Self::Number)
                } else if PORT_NAME_REGEX.is_match(s) {
                    Ok(Self::Symbolic(s.to_string()))
                } else {
                    Err(ConfigError::invalid_value(
                        keys::PORT,
                        format!("{:?} is neither a port number nor a variable name", s),
                    ))
                }
            }
            other => Err(ConfigError::InvalidType {
                key: keys::PORT,
                expected: "a string or an integer",
                found: other.kind(),
            }),
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(_))
    }

    /// Resolves the port against the host's bindings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedPort`] if a symbolic name has no
    /// binding, or [`ConfigError::InvalidValue`] if the bound value is not
    /// a usable port.
    pub fn resolve<B: PortBinding + ?Sized>(&self, binding: &B) -> ConfigResult<u16> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Symbolic(name) => {
                let raw = binding
                    .lookup(name)
                    .ok_or_else(|| ConfigError::UnresolvedPort { name: name.clone() })?;
                let port = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| {
                        ConfigError::invalid_value(
                            keys::PORT,
                            format!("{} is bound to {:?}, which is not a port", name, raw),
                        )
                    })
                    .and_then(parse_port_number)?;
                debug!(name = %name, port, "resolved symbolic port");
                Ok(port)
            }
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Symbolic(name) => f.write_str(name),
        }
    }
}

fn parse_port_number(n: i64) -> ConfigResult<u16> {
    match u16::try_from(n) {
        Ok(0) | Err(_) => Err(ConfigError::invalid_value(
            keys::PORT,
            format!("{} is not in 1..=65535", n),
        )),
        Ok(port) => Ok(port),
    }
}

/// Source of values for symbolic ports.
pub trait PortBinding {
    /// Returns the raw value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads bindings from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvPortBinding;

impl PortBinding for EnvPortBinding {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed table of bindings injected by the host.
#[derive(Debug, Clone, Default)]
pub struct MapPortBinding {
    values: HashMap<String, String>,
}

impl MapPortBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }
}

impl PortBinding for MapPortBinding {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapPortBinding
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |binding, (k, v)| binding.with(k, v))
    }
}
