use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::database::DatabaseConfig;
use crate::error::{ApiError, Result};
use crate::utils::get_env_with_prefix;

/// Main configuration for the courses service
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size in bytes (default: 1MB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

fn default_max_body_size() -> usize {
    1024 * 1024
}

impl ServerConfig {
    pub fn addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set the maximum request body size in bytes
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.server.max_body_size = max_body_size;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_database(mut self, database: DatabaseConfig) -> Self {
        self.config.database = database;
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = url.into();
        self
    }

    /// Load configuration from environment variables with COURSES_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(host) = get_env_with_prefix("HOST") {
            self.config.server.host = host;
        }
        if let Some(port) = get_env_with_prefix("PORT") {
            if let Ok(p) = port.parse() {
                self.config.server.port = p;
            }
        }
        if let Some(max_body_size) = get_env_with_prefix("MAX_BODY_SIZE") {
            if let Ok(size) = max_body_size.parse() {
                self.config.server.max_body_size = size;
            }
        }
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_with_prefix("LOG_JSON") {
            self.config.logging.json = json.parse().unwrap_or(false);
        }

        self.config.database = self.config.database.with_env_overrides();

        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error if the server address, port, log level, body size
    /// or database URL is invalid.
    pub fn build(self) -> Result<Config> {
        self.config.server.addr().map_err(|e| {
            ApiError::bad_request(format!(
                "Invalid server address {}:{} - {}",
                self.config.server.host, self.config.server.port, e
            ))
        })?;

        if !VALID_LOG_LEVELS.contains(&self.config.logging.level.to_lowercase().as_str()) {
            return Err(ApiError::bad_request(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if self.config.server.port == 0 {
            return Err(ApiError::bad_request("Server port must be greater than 0"));
        }

        if self.config.server.max_body_size == 0 {
            return Err(ApiError::bad_request(
                "Maximum body size must be greater than 0",
            ));
        }

        if self.config.database.url.trim().is_empty() {
            return Err(ApiError::bad_request("Database URL must not be empty"));
        }

        if self.config.database.max_connections == 0 {
            return Err(ApiError::bad_request(
                "Database max_connections must be greater than 0",
            ));
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_host("127.0.0.1")
            .with_port(9090)
            .with_log_level("debug")
            .with_json_logging(true)
            .with_database_url("sqlite::memory:")
            .build()
            .unwrap();

        assert_eq!(config.server.addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = ConfigBuilder::new().with_log_level("verbose").build();
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = ConfigBuilder::new().with_host("not a host").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(ConfigBuilder::new().with_port(0).build().is_err());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        assert!(ConfigBuilder::new().with_database_url("  ").build().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }
}
