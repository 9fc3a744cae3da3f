//! Calendar URL command.

use std::io::Write;

use zpush_caldav_config::{CalDavBackendConfig, PortBinding};

use crate::error::CliResult;

/// Print `username`'s calendar collection URL, resolving the port
/// through `binding`.
pub fn url<B: PortBinding + ?Sized>(
    config: &CalDavBackendConfig,
    username: &str,
    binding: &B,
    out: &mut impl Write,
) -> CliResult<()> {
    let url = config.calendar_url(username, binding)?;
    writeln!(out, "{}", url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use zpush_caldav_config::{ConfigError, MapPortBinding};

    use super::*;
    use crate::error::CliError;

    #[test]
    fn prints_resolved_url() {
        let config = zpush_caldav_config::load().unwrap();
        let binding = MapPortBinding::new().with("HTTPS_PORT", 8443);
        let mut out = Vec::new();
        url(&config, "alice", &binding, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://127.0.0.1:8443/caldav/calendars/alice/\n"
        );
    }

    #[test]
    fn unbound_port_is_reported() {
        let config = zpush_caldav_config::load().unwrap();
        let mut out = Vec::new();
        let err = url(&config, "alice", &MapPortBinding::new(), &mut out).unwrap_err();
        assert!(matches!(
            &err,
            CliError::Config(ConfigError::UnresolvedPort { .. })
        ));
        assert_eq!(
            err.to_string(),
            "configuration error: port variable HTTPS_PORT is not bound"
        );
        assert!(out.is_empty());
    }
}
