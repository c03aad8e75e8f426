//! Runtime configuration from environment variables
//!
//! - ALERTSMS_HOST: Bind address (default: 0.0.0.0)
//! - ALERTSMS_PORT: Port number (default: 1025)
//! - ALERTSMS_STATE_FILE: Dedup state file (default: active-alerts.yaml)
//! - ALERTSMS_API_URL: SMS API endpoint (default: https://api.46elks.com/a1/sms)
//! - ALERTSMS_API_USERNAME / ALERTSMS_API_PASSWORD: SMS API credentials
//! - ALERTSMS_SENDER: Sender name on outgoing SMS (default: KamelNet)
//! - ALERTSMS_DRY_RUN: Log messages instead of sending them (default: false)

use std::path::PathBuf;

use crate::notify::elks::{DEFAULT_API_URL, DEFAULT_SENDER};
use crate::notify::ElksConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub state_file: PathBuf,
    /// `None` in dry-run mode
    pub sms: Option<ElksConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1025,
            state_file: PathBuf::from("active-alerts.yaml"),
            sms: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("ALERTSMS_HOST").unwrap_or(defaults.host);
        let port = match lookup("ALERTSMS_PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| ConfigError::Invalid("ALERTSMS_PORT", p))?,
            None => defaults.port,
        };
        let state_file = lookup("ALERTSMS_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);

        let dry_run = lookup("ALERTSMS_DRY_RUN")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let sms = if dry_run {
            None
        } else {
            let username = lookup("ALERTSMS_API_USERNAME")
                .ok_or(ConfigError::Missing("ALERTSMS_API_USERNAME"))?;
            let password = lookup("ALERTSMS_API_PASSWORD")
                .ok_or(ConfigError::Missing("ALERTSMS_API_PASSWORD"))?;
            let api_url =
                lookup("ALERTSMS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
            let from = lookup("ALERTSMS_SENDER").unwrap_or_else(|| DEFAULT_SENDER.to_string());

            Some(
                ElksConfig::new(username, password)
                    .with_api_url(api_url)
                    .with_from(from),
            )
        };

        Ok(Self {
            host,
            port,
            state_file,
            sms,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_credentials() {
        let config = Config::from_lookup(lookup(&[
            ("ALERTSMS_API_USERNAME", "u"),
            ("ALERTSMS_API_PASSWORD", "p"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 1025);
        assert_eq!(config.state_file, PathBuf::from("active-alerts.yaml"));

        let sms = config.sms.unwrap();
        assert_eq!(sms.api_url, DEFAULT_API_URL);
        assert_eq!(sms.from, "KamelNet");
        assert_eq!(sms.username, "u");
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_lookup(lookup(&[("ALERTSMS_API_USERNAME", "u")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ALERTSMS_API_PASSWORD")));
    }

    #[test]
    fn test_dry_run_needs_no_credentials() {
        let config = Config::from_lookup(lookup(&[
            ("ALERTSMS_DRY_RUN", "true"),
            ("ALERTSMS_PORT", "9093"),
            ("ALERTSMS_STATE_FILE", "/var/lib/alertsms/state.yaml"),
        ]))
        .unwrap();

        assert!(config.sms.is_none());
        assert_eq!(config.port, 9093);
        assert_eq!(config.state_file, PathBuf::from("/var/lib/alertsms/state.yaml"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("ALERTSMS_DRY_RUN", "1"),
            ("ALERTSMS_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("ALERTSMS_PORT", _)));
    }
}
