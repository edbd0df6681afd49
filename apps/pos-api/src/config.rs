//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so the binary runs out of the box in development.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Maximum connections in the database pool
    pub db_max_connections: u32,

    /// Bound on SQLite write-lock waits, in milliseconds. A checkout that
    /// waits longer fails with a retryable conflict instead of hanging.
    pub db_busy_timeout_ms: u64,

    /// TTL for the advisory category-existence cache, in seconds
    pub category_cache_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/toko.db".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            db_busy_timeout_ms: env::var("DB_BUSY_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_BUSY_TIMEOUT_MS".to_string()))?,

            category_cache_ttl_secs: env::var("CATEGORY_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CATEGORY_CACHE_TTL_SECS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}
