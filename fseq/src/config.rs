//! Validator configuration loaded from JSON
//!
//! ```json
//! {
//!   "limits": { "channel_count": 48, "max_duration_secs": 300, "command_capacity": 681 },
//!   "server": { "host": "0.0.0.0", "port": 3000, "max_upload_mb": 16 }
//! }
//! ```
//!
//! Every field is optional and falls back to the stock controller and a
//! local server.

use std::path::Path;

use fseq_core::{ControllerLimits, Validator};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Limits plus upload server settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub limits: ControllerLimits,
    pub server: ServerConfig,
}

/// Where the upload server listens and how much it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_upload_mb: 16,
        }
    }
}

impl ServerConfig {
    /// Upload size limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ValidatorConfig {
    /// Read a config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(Error::io(path))?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Set the listen host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Set the listen port
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Validator for the configured limits
    pub fn validator(&self) -> Validator {
        Validator::new(self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = ValidatorConfig::from_json("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.limits, ControllerLimits::new());
        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_partial_limits() {
        let config =
            ValidatorConfig::from_json(r#"{"limits": {"command_capacity": 1024}}"#).unwrap();
        assert_eq!(config.limits.command_capacity, 1024);
        assert_eq!(config.limits.channel_count, 48);
        assert_eq!(config.limits.max_duration_secs, 300);
        assert_eq!(config.validator().limits().command_capacity, 1024);
    }

    #[test]
    fn test_overrides_and_upload_size() {
        let config = ValidatorConfig::default().with_host("0.0.0.0").with_port(8080);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.max_upload_bytes(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            ValidatorConfig::from_json(r#"{"limits": 5}"#),
            Err(Error::Config(_))
        ));
    }
}
