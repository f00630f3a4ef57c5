use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    /// Format: sqlite://path/to/courses.db?mode=rwc
    #[serde(default = "default_url")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,

    /// Run migrations on startup
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

fn default_url() -> String {
    "sqlite://courses.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600 // 10 minutes
}

fn default_auto_migrate() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
            auto_migrate: default_auto_migrate(),
        }
    }
}

impl DatabaseConfig {
    /// Apply `DATABASE_*` overrides from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = get_env_with_prefix("DATABASE_URL") {
            self.url = url;
        }

        if let Some(max_conn) = get_env_with_prefix("DATABASE_MAX_CONNECTIONS") {
            if let Ok(value) = max_conn.parse() {
                self.max_connections = value;
            }
        }

        if let Some(min_conn) = get_env_with_prefix("DATABASE_MIN_CONNECTIONS") {
            if let Ok(value) = min_conn.parse() {
                self.min_connections = value;
            }
        }

        if let Some(timeout) = get_env_with_prefix("DATABASE_CONNECT_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.connect_timeout = value;
            }
        }

        if let Some(timeout) = get_env_with_prefix("DATABASE_IDLE_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.idle_timeout = value;
            }
        }

        if let Some(auto_migrate) = get_env_with_prefix("DATABASE_AUTO_MIGRATE") {
            self.auto_migrate = auto_migrate.parse().unwrap_or(true);
        }

        self
    }
}

/// Replace the password in a database URL with `[REDACTED]` so it can be logged
pub fn redact_database_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("[REDACTED]")).is_err() {
                return "[invalid database url]".to_string();
            }
            parsed.to_string()
        }
        Ok(_) => raw.to_string(),
        Err(_) => "[invalid database url]".to_string(),
    }
}
