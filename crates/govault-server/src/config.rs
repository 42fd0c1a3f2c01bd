//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, vault database
//! path, fetch timeout and engine thresholds.

use govault_engine::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// SQLite vault database, opened once per request
    pub database_path: PathBuf,

    /// Upper bound on loading records for one request, in milliseconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_ms: u64,

    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON snapshot imported into the database at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Relationship engine thresholds
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Default fetch timeout: 5 seconds
fn default_fetch_timeout() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and engine thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_ms must be positive".to_string()));
        }
        self.engine
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            database_path: PathBuf::from("govault.db"),
            fetch_timeout_ms: default_fetch_timeout(),
            log_level: default_log_level(),
            seed_file: None,
            engine: EngineConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govault_engine::RiskPolicy;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 8080);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            database_path = "/var/lib/govault/vault.db"
            fetch_timeout_ms = 2500
            log_level = "govault=debug"
            seed_file = "seed.json"

            [engine]
            loan_threshold = 0.8
            risk_policy = "highest"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.fetch_timeout_ms, 2500);
        assert_eq!(config.log_level, "govault=debug");
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
        assert_eq!(config.engine.loan_threshold, 0.8);
        assert_eq!(config.engine.insurance_threshold, 0.5);
        assert_eq!(config.engine.risk_policy, RiskPolicy::Highest);
    }

    #[test]
    fn test_defaults_applied() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 8080
            database_path = "vault.db"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.fetch_timeout_ms, 5000);
        assert_eq!(config.log_level, "info");
        assert!(config.seed_file.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_engine_config() {
        let mut config = ServerConfig::default_test_config();
        config.engine.loan_amount_tolerance = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ServerConfig::default_test_config();
        config.database_path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }
}
