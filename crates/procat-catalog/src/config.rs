//! Configuration management

use procat_common::logging::LogConfig;
use serde::{Deserialize, Serialize};

// ============================================================================
// Database Configuration Constants
// ============================================================================

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/procat";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LogConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
            connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl DatabaseConfig {
    /// Read `DATABASE_URL` and `PROCAT_DB_*`, falling back to the defaults
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env_or("PROCAT_DB_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS),
            min_connections: env_or("PROCAT_DB_MIN_CONNECTIONS", DEFAULT_DATABASE_MIN_CONNECTIONS),
            connect_timeout_secs: env_or(
                "PROCAT_DB_CONNECT_TIMEOUT",
                DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            ),
            idle_timeout_secs: env_or("PROCAT_DB_IDLE_TIMEOUT", DEFAULT_DATABASE_IDLE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            database: DatabaseConfig::from_env(),
            logging: LogConfig::from_env()?,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Database min_connections ({}) cannot be greater than max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.database.connect_timeout_secs == 0 {
            anyhow::bail!("Database connect timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LogConfig::default(),
        }
    }
}
