//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `somfyctl.toml` in the working directory unless another path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use somfyctl_app::model::FailurePolicy;

/// Default configuration file name.
pub const DEFAULT_PATH: &str = "somfyctl.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gateway to talk to.
    pub gateway: GatewayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Behaviour of the remote list.
    pub ui: UiConfig,
    /// Listener of `serve-virtual`.
    pub virtual_gateway: VirtualGatewayConfig,
}

/// Gateway connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL, `/api/v1` is appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether a failed request reverts its optimistic change.
    pub failure_policy: FailurePolicy,
}

/// Virtual gateway listener.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualGatewayConfig {
    /// Address to bind to (e.g. `127.0.0.1`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SOMFYCTL_BASE_URL") {
            self.gateway.base_url = val;
        }
        if let Ok(val) = std::env::var("SOMFYCTL_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.gateway.timeout_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("SOMFYCTL_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.virtual_gateway.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.virtual_gateway.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SOMFYCTL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Check the semantic rules the file format cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.gateway.base_url).map_err(|err| {
            ConfigError::Validation(format!(
                "invalid base url '{}': {err}",
                self.gateway.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "base url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout must be non-zero".to_string(),
            ));
        }
        if self.virtual_gateway.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.timeout_secs)
    }

    /// Return the `host:port` bind address of the virtual gateway.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.virtual_gateway.host, self.virtual_gateway.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.4.1/".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "somfyctl=info,somfyctl_app=info".to_string(),
        }
    }
}

impl Default for VirtualGatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://192.168.4.1/");
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.ui.failure_policy, FailurePolicy::Rollback);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.virtual_gateway.port, 8080);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [gateway]
            base_url = 'http://blinds.local'
            timeout_secs = 3

            [logging]
            filter = 'debug'

            [ui]
            failure_policy = 'keep'

            [virtual_gateway]
            host = '0.0.0.0'
            port = 9090
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.gateway.base_url, "http://blinds.local");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.ui.failure_policy, FailurePolicy::Keep);
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.gateway.timeout_secs, 10);
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_base_url_without_http_scheme() {
        let mut config = Config::default();
        config.gateway.base_url = "ftp://192.168.4.1".to_string();
        assert!(config.validate().is_err());

        config.gateway.base_url = "192.168.4.1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.gateway.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.virtual_gateway.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_unknown_failure_policy() {
        let result: Result<Config, _> = toml::from_str("[ui]\nfailure_policy = 'retry'");
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
