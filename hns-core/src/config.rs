//! Client configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! before this runs) and can be overridden with the builder methods.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use hns_api::{Client, DEFAULT_BASE_URL};
use thiserror::Error;

use crate::store::CredentialStore;

pub const ENV_BASE_URL: &str = "HNS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "HNS_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "HNS_DATA_DIR";

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HNS_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("No data directory available - set HNS_DATA_DIR")]
    NoDataDir,
}

/// Where to reach the service and where to keep local state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL.
    pub base_url: String,

    /// Whole-request timeout.
    pub timeout: Duration,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Directory for the credential file and logs. `None` means the
    /// platform default.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration for the public service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `HNS_BASE_URL`, `HNS_TIMEOUT_SECS` and `HNS_DATA_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Set the service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("com", "HackOrSnooze", "hns")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoDataDir)
    }

    /// Build the HTTP client.
    pub fn build_client(&self) -> Result<Client, hns_api::Error> {
        Client::with_timeouts(&self.base_url, self.timeout, self.connect_timeout)
    }

    /// Credential store inside the data directory.
    pub fn credential_store(&self) -> Result<CredentialStore, ConfigError> {
        Ok(CredentialStore::in_dir(self.data_dir()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:5000"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_DATA_DIR, "/tmp/hns"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/hns"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "  "), (ENV_DATA_DIR, "")]))
                .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["soon", "0", "-3"] {
            let result = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, raw)]));
            assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))), "{raw}");
        }
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:9999")
            .with_timeout(Duration::from_secs(2))
            .with_data_dir("/var/lib/hns");

        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.build_client().is_ok());
        assert!(config
            .credential_store()
            .unwrap()
            .path()
            .ends_with("credentials.json"));
    }
}
