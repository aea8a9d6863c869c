//! Environment-variable configuration.
//!
//! The whole configuration surface is one knob: `PORT`. Everything else a
//! deployment would tune (TLS, limits, timeouts) belongs to the proxy in
//! front of the service, so there is nothing to configure here.

use std::env;
use std::ffi::OsString;

use crate::error::Error;

/// Default port when `PORT` is unset or empty.
const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, read once at startup.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// `PORT` unset or empty falls back to 3000. A `PORT` that is set but
    /// does not parse as a port number — including one that is not valid
    /// Unicode — is a startup error: failing loud beats silently listening
    /// somewhere the deployment did not ask for.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_port_var(env::var_os("PORT"))
    }

    fn from_port_var(value: Option<OsString>) -> Result<Self, Error> {
        let Some(value) = value else {
            return Ok(Self { port: DEFAULT_PORT });
        };
        let value = value
            .into_string()
            .map_err(|raw| Error::InvalidPort(raw.to_string_lossy().into_owned()))?;
        if value.is_empty() {
            return Ok(Self { port: DEFAULT_PORT });
        }
        let port = value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPort(value))?;
        Ok(Self { port })
    }

    /// The bind address: `0.0.0.0:<port>`.
    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(s: &str) -> Option<OsString> {
        Some(OsString::from(s))
    }

    #[test]
    fn unset_port_defaults() {
        let config = Config::from_port_var(None).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn empty_port_defaults() {
        let config = Config::from_port_var(var("")).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn explicit_port_parses() {
        let config = Config::from_port_var(var("8080")).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn garbage_port_is_an_error() {
        let err = Config::from_port_var(var("eight thousand")).unwrap_err();
        assert!(matches!(err, Error::InvalidPort(_)));
    }

    #[test]
    fn out_of_range_port_is_an_error() {
        let err = Config::from_port_var(var("70000")).unwrap_err();
        assert!(matches!(err, Error::InvalidPort(_)));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_port_is_an_error_not_a_fallback() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![b'8', b'0', 0xFF, b'8', b'0']);
        let err = Config::from_port_var(Some(raw)).unwrap_err();
        assert!(matches!(err, Error::InvalidPort(_)));
    }
}
