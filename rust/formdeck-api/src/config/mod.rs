//! Configuration management.
//!
//! Configuration loads from three layered sources: built-in defaults, an
//! optional `config/formdeck` file, and `FORMDECK`-prefixed environment
//! variables with `__` as the section separator (for example
//! `FORMDECK__SERVER__PORT=9090`). A `.env` file is honored if present.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timeout_secs: 30,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./formdeck.db"),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config files, and environment
    /// variables, in that order.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.timeout_secs", 30)?
            .set_default("database.path", "./formdeck.db")?
            // Add config file if it exists
            .add_source(config::File::with_name("config/formdeck").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("FORMDECK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.database.path, PathBuf::from("./formdeck.db"));
    }

    #[test]
    #[serial_test::serial]
    fn test_load_uses_defaults_without_overrides() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override() {
        // SAFETY: env-var tests run serialized, no concurrent env access
        unsafe {
            std::env::set_var("FORMDECK__SERVER__PORT", "9090");
        }
        let config = AppConfig::load().unwrap();
        // SAFETY: same serialized test
        unsafe {
            std::env::remove_var("FORMDECK__SERVER__PORT");
        }
        assert_eq!(config.server.port, 9090);
    }
}
