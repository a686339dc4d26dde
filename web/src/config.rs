//! Environment-based configuration.
//!
//! All settings come from environment variables with sensible defaults, so
//! the binary runs with nothing but `DATABASE_URL` set. A `.env` file is
//! honored in development via `dotenvy`.

use std::env;
use thiserror::Error;

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but unparseable.
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, default `0.0.0.0`.
    pub host: String,
    /// Bind port, default `3000`.
    pub port: u16,
}

/// Database pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Required.
    pub url: String,
    /// Pool size, default `10`.
    pub max_connections: u32,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database pool settings.
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is unset or a numeric
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 3000)?;
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }

    /// The socket address string the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
