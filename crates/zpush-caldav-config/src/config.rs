//! The CalDAV backend configuration object.

use std::net::Ipv6Addr;

use serde::Serialize;
use tracing::{debug, info, warn};
use url::{Host, Url};

use crate::error::{ConfigError, ConfigResult};
use crate::keys;
use crate::path::PathTemplate;
use crate::personal::PersonalMode;
use crate::port::{PortBinding, PortSpec};
use crate::protocol::Protocol;
use crate::sync_period::MaxSyncPeriod;
use crate::value::{RawEntries, RawValue};

/// Settings the CalDAV backend reads once at startup.
///
/// Instances only come out of the loaders, so every one has passed
/// validation. There are no setters; share it by reference or `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalDavBackendConfig {
    protocol: Protocol,
    server: String,
    port: PortSpec,
    path_template: PathTemplate,
    personal_mode: PersonalMode,
    supports_sync: bool,
    max_sync_period: MaxSyncPeriod,
}

impl CalDavBackendConfig {
    /// Builds a configuration from parsed entries.
    ///
    /// Unknown keys are logged and ignored. The first missing or malformed
    /// key, in declaration order, is reported.
    pub fn from_entries(entries: &RawEntries) -> ConfigResult<Self> {
        for key in entries.keys().filter(|key| !keys::is_known(key)) {
            warn!(key = %key, "ignoring unknown configuration key");
        }

        let protocol = require_str(entries, keys::PROTOCOL)?
            .parse::<Protocol>()
            .map_err(|reason| ConfigError::invalid_value(keys::PROTOCOL, reason))?;
        let server = parse_server(require_str(entries, keys::SERVER)?)?;
        let port = PortSpec::from_raw(require(entries, keys::PORT)?)?;
        let path_template = PathTemplate::parse(require_str(entries, keys::PATH)?)
            .map_err(|reason| ConfigError::invalid_value(keys::PATH, reason))?;
        let personal_mode = require_str(entries, keys::PERSONAL)?
            .parse::<PersonalMode>()
            .map_err(|reason| ConfigError::invalid_value(keys::PERSONAL, reason))?;
        let supports_sync = require_bool(entries, keys::SUPPORTS_SYNC)?;
        let max_sync_period = MaxSyncPeriod::from_secs(require_int(entries, keys::MAX_SYNC_PERIOD)?)
            .map_err(|reason| ConfigError::invalid_value(keys::MAX_SYNC_PERIOD, reason))?;

        let config = Self {
            protocol,
            server,
            port,
            path_template,
            personal_mode,
            supports_sync,
            max_sync_period,
        };
        info!(
            protocol = %config.protocol,
            server = %config.server,
            port = %config.port,
            supports_sync = config.supports_sync,
            "CalDAV backend configuration loaded"
        );
        Ok(config)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// The port as configured; may still be symbolic.
    pub fn port(&self) -> &PortSpec {
        &self.port
    }

    pub fn path_template(&self) -> &PathTemplate {
        &self.path_template
    }

    pub fn personal_mode(&self) -> &PersonalMode {
        &self.personal_mode
    }

    /// Whether the server supports native incremental sync.
    pub fn supports_sync(&self) -> bool {
        self.supports_sync
    }

    pub fn max_sync_period(&self) -> MaxSyncPeriod {
        self.max_sync_period
    }

    /// URL of `username`'s calendar collection.
    ///
    /// The port is resolved through `binding`; the username is
    /// percent-encoded into the path template.
    pub fn calendar_url<B: PortBinding + ?Sized>(
        &self,
        username: &str,
        binding: &B,
    ) -> ConfigResult<Url> {
        if username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        let port = self.port.resolve(binding)?;
        let url = Url::parse(&format!(
            "{}://{}:{}{}",
            self.protocol,
            self.url_host(),
            port,
            self.path_template.expand(username)
        ))?;
        debug!(%url, "built calendar URL");
        Ok(url)
    }

    fn url_host(&self) -> String {
        if self.server.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.server)
        } else {
            self.server.clone()
        }
    }

    /// The configuration keyed by its persisted names, for serialization.
    pub fn persisted(&self) -> Persisted<'_> {
        Persisted {
            protocol: self.protocol,
            server: &self.server,
            port: &self.port,
            path: self.path_template.as_str(),
            personal: self.personal_mode.as_str(),
            supports_sync: self.supports_sync,
            max_sync_period: self.max_sync_period,
        }
    }
}

/// Serializable view of a [`CalDavBackendConfig`] using the persisted key
/// names, in declaration order.
#[derive(Debug, Serialize)]
pub struct Persisted<'a> {
    #[serde(rename = "CALDAV_PROTOCOL")]
    protocol: Protocol,
    #[serde(rename = "CALDAV_SERVER")]
    server: &'a str,
    #[serde(rename = "CALDAV_PORT")]
    port: &'a PortSpec,
    #[serde(rename = "CALDAV_PATH")]
    path: &'a str,
    #[serde(rename = "CALDAV_PERSONAL")]
    personal: &'a str,
    #[serde(rename = "CALDAV_SUPPORTS_SYNC")]
    supports_sync: bool,
    #[serde(rename = "CALDAV_MAX_SYNC_PERIOD")]
    max_sync_period: MaxSyncPeriod,
}

fn require<'a>(entries: &'a RawEntries, key: &'static str) -> ConfigResult<&'a RawValue> {
    entries.get(key).ok_or(ConfigError::MissingField { key })
}

fn require_str<'a>(entries: &'a RawEntries, key: &'static str) -> ConfigResult<&'a str> {
    match require(entries, key)? {
        RawValue::Str(s) => Ok(s.as_str()),
        other => Err(type_error(key, "a string", other)),
    }
}

fn require_bool(entries: &RawEntries, key: &'static str) -> ConfigResult<bool> {
    match require(entries, key)? {
        RawValue::Bool(b) => Ok(*b),
        other => Err(type_error(key, "a boolean", other)),
    }
}

fn require_int(entries: &RawEntries, key: &'static str) -> ConfigResult<i64> {
    match require(entries, key)? {
        RawValue::Int(n) => Ok(*n),
        other => Err(type_error(key, "an integer", other)),
    }
}

fn type_error(key: &'static str, expected: &'static str, found: &RawValue) -> ConfigError {
    ConfigError::InvalidType {
        key,
        expected,
        found: found.kind(),
    }
}

fn parse_server(server: &str) -> ConfigResult<String> {
    let server = server.trim();
    if server.is_empty() {
        return Err(ConfigError::invalid_value(keys::SERVER, "must not be empty"));
    }
    if server.parse::<Ipv6Addr>().is_ok() {
        return Ok(server.to_string());
    }
    match Host::parse(server) {
        Ok(_) => Ok(server.to_string()),
        Err(e) => Err(ConfigError::invalid_value(
            keys::SERVER,
            format!("{:?} is not a host name or IP address: {}", server, e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MapPortBinding;
    use crate::source::parse_toml;

    const BUNDLED: &str = include_str!("../conf/backend_caldav.toml");

    fn entries() -> RawEntries {
        parse_toml(BUNDLED).unwrap()
    }

    fn with(key: &str, value: RawValue) -> RawEntries {
        let mut entries = entries();
        entries.insert(key.to_string(), value);
        entries
    }

    #[test]
    fn bundled_values() {
        let config = CalDavBackendConfig::from_entries(&entries()).unwrap();
        assert_eq!(config.protocol(), Protocol::Https);
        assert_eq!(config.server(), "127.0.0.1");
        assert_eq!(config.port(), &PortSpec::Symbolic("HTTPS_PORT".into()));
        assert_eq!(config.path_template().as_str(), "/caldav/calendars/%u/");
        assert_eq!(config.personal_mode(), &PersonalMode::Principal);
        assert!(!config.supports_sync());
        assert_eq!(config.max_sync_period().get(), 2147483647);
    }

    #[test]
    fn every_key_is_required() {
        for key in keys::ALL {
            let mut entries = entries();
            entries.remove(key);
            let err = CalDavBackendConfig::from_entries(&entries).unwrap_err();
            assert!(
                matches!(&err, ConfigError::MissingField { key: missing } if *missing == key),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn wrong_types_are_rejected() {
        let cases = [
            (keys::SUPPORTS_SYNC, RawValue::Str("false".into())),
            (keys::MAX_SYNC_PERIOD, RawValue::Str("2147483647".into())),
            (keys::PROTOCOL, RawValue::Bool(true)),
            (keys::PATH, RawValue::Int(1)),
            (keys::SERVER, RawValue::Other("an array")),
        ];
        for (key, value) in cases {
            let err = CalDavBackendConfig::from_entries(&with(key, value)).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidType { key: k, .. } if *k == key),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn bad_values_are_rejected() {
        let cases = [
            (keys::PROTOCOL, RawValue::Str("ftp".into())),
            (keys::SERVER, RawValue::Str("".into())),
            (keys::SERVER, RawValue::Str("https://dav.example.org".into())),
            (keys::SERVER, RawValue::Str("alice@evil.example".into())),
            (keys::SERVER, RawValue::Str("dav?x=1".into())),
            (keys::SERVER, RawValue::Str("127.0.0.1:8080".into())),
            (keys::SERVER, RawValue::Str("dav example".into())),
            (keys::PATH, RawValue::Str("/caldav/%u/?x=1".into())),
            (keys::PATH, RawValue::Str("/caldav/%u/#frag".into())),
            (keys::PATH, RawValue::Str("/caldav/calendars/".into())),
            (keys::PERSONAL, RawValue::Str("".into())),
            (keys::MAX_SYNC_PERIOD, RawValue::Int(2147483648)),
            (keys::MAX_SYNC_PERIOD, RawValue::Int(-5)),
        ];
        for (key, value) in cases {
            let err = CalDavBackendConfig::from_entries(&with(key, value)).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { key: k, .. } if *k == key),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn accepts_domains_and_addresses() {
        for server in ["dav.example.org", "localhost", "127.0.0.1", "::1", "[::1]"] {
            let entries = with(keys::SERVER, RawValue::Str(server.into()));
            let config = CalDavBackendConfig::from_entries(&entries).unwrap();
            assert_eq!(config.server(), server);
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let entries = with("CALDAV_UNUSED", RawValue::Bool(true));
        let config = CalDavBackendConfig::from_entries(&entries).unwrap();
        assert_eq!(config.server(), "127.0.0.1");
    }

    #[test]
    fn calendar_url_with_custom_port() {
        let config = CalDavBackendConfig::from_entries(&entries()).unwrap();
        let binding = MapPortBinding::new().with("HTTPS_PORT", 8443);
        let url = config.calendar_url("alice", &binding).unwrap();
        assert_eq!(url.as_str(), "https://127.0.0.1:8443/caldav/calendars/alice/");
    }

    #[test]
    fn calendar_url_drops_default_port() {
        let config = CalDavBackendConfig::from_entries(&entries()).unwrap();
        let binding = MapPortBinding::new().with("HTTPS_PORT", 443);
        let url = config.calendar_url("bob@example.com", &binding).unwrap();
        assert_eq!(
            url.as_str(),
            "https://127.0.0.1/caldav/calendars/bob%40example.com/"
        );
    }

    #[test]
    fn calendar_url_brackets_ipv6() {
        let entries = with(keys::SERVER, RawValue::Str("::1".into()));
        let config = CalDavBackendConfig::from_entries(&entries).unwrap();
        let binding = MapPortBinding::new().with("HTTPS_PORT", 8443);
        let url = config.calendar_url("alice", &binding).unwrap();
        assert_eq!(url.as_str(), "https://[::1]:8443/caldav/calendars/alice/");
    }

    #[test]
    fn calendar_url_errors() {
        let config = CalDavBackendConfig::from_entries(&entries()).unwrap();
        assert!(matches!(
            config.calendar_url(" ", &MapPortBinding::new()),
            Err(ConfigError::EmptyUsername)
        ));
        assert!(matches!(
            config.calendar_url("alice", &MapPortBinding::new()),
            Err(ConfigError::UnresolvedPort { .. })
        ));
    }

    #[test]
    fn persisted_json_uses_original_names() {
        let config = CalDavBackendConfig::from_entries(&entries()).unwrap();
        let json = serde_json::to_string_pretty(&config.persisted()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "CALDAV_PROTOCOL": "https",
          "CALDAV_SERVER": "127.0.0.1",
          "CALDAV_PORT": "HTTPS_PORT",
          "CALDAV_PATH": "/caldav/calendars/%u/",
          "CALDAV_PERSONAL": "PRINCIPAL",
          "CALDAV_SUPPORTS_SYNC": false,
          "CALDAV_MAX_SYNC_PERIOD": 2147483647
        }
        "#);
    }

    #[test]
    fn persisted_toml_reloads_identically() {
        let entries = with(keys::PORT, RawValue::Int(8443));
        let config = CalDavBackendConfig::from_entries(&entries).unwrap();
        let rendered = toml::to_string(&config.persisted()).unwrap();
        let reloaded = CalDavBackendConfig::from_entries(&parse_toml(&rendered).unwrap()).unwrap();
        assert_eq!(reloaded, config);
    }
}
