//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Where events are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue("STORAGE_BACKEND")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend selection
    pub storage_backend: StorageBackend,

    /// Database connection URL (required for the postgres backend)
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Explicit log format; unset defers to the environment
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend: StorageBackend = lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let log_format = lookup("LOG_FORMAT").map(|v| v.parse()).transpose()?;

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            log_format,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Log format to initialize tracing with
    ///
    /// JSON in production, pretty elsewhere, unless LOG_FORMAT says otherwise.
    pub fn effective_log_format(&self) -> LogFormat {
        match self.log_format {
            Some(format) => format,
            None if self.is_production() => LogFormat::Json,
            None => LogFormat::Pretty,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/events")]).unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.log_format.is_none());
        assert!(!config.is_production());
        assert_eq!(config.effective_log_format(), LogFormat::Pretty);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = load(&[("STORAGE_BACKEND", "memory"), ("LOG_FORMAT", "json")]).unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.effective_log_format(), LogFormat::Json);
    }

    #[test]
    fn test_production_defaults_to_json_logs() {
        let config = load(&[("STORAGE_BACKEND", "memory"), ("ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.effective_log_format(), LogFormat::Json);

        let config = load(&[
            ("STORAGE_BACKEND", "memory"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();
        assert_eq!(config.effective_log_format(), LogFormat::Pretty);

        let err = load(&[("STORAGE_BACKEND", "memory"), ("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("LOG_FORMAT")));
    }

    #[test]
    fn test_invalid_values_are_named() {
        let err = load(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("PORT")));

        let err = load(&[("STORAGE_BACKEND", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("STORAGE_BACKEND")));
    }
}
