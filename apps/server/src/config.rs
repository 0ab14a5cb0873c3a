//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_addr: String,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Whether to run migrations on startup
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("MEALCART_HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MEALCART_HTTP_PORT".to_string()))?,

            bind_addr: env::var("MEALCART_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),

            database_path: env::var("MEALCART_DATABASE_PATH")
                .unwrap_or_else(|_| "./mealcart.db".to_string()),

            run_migrations: env::var("MEALCART_RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            http_port: 9000,
            bind_addr: "127.0.0.1".to_string(),
            database_path: "./test.db".to_string(),
            run_migrations: true,
        };
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }
}
