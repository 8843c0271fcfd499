//! Environment-sourced application configuration.

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_LOOKUP_TIMEOUT_SECONDS: u64 = 30;

/// Failures while assembling configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Startup configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Base URL of the external vehicle-info API (`LOOKUP_API_URL`).
    pub lookup_api_url: Url,
    /// Listen address (`BIND_ADDR`, default `0.0.0.0:8080`).
    pub bind_addr: String,
    /// Connection pool size (`DB_POOL_MAX_SIZE`, default 10).
    pub db_pool_max_size: u32,
    /// Outbound lookup timeout (`LOOKUP_TIMEOUT_SECONDS`, default 30).
    pub lookup_timeout: Duration,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a value
    /// does not parse.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing {
            name: "DATABASE_URL",
        })?;

        let lookup_api_url = get("LOOKUP_API_URL").ok_or(ConfigError::Missing {
            name: "LOOKUP_API_URL",
        })?;
        let lookup_api_url = Url::parse(&lookup_api_url).map_err(|e| ConfigError::Invalid {
            name: "LOOKUP_API_URL",
            message: e.to_string(),
        })?;

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());

        let db_pool_max_size = match get("DB_POOL_MAX_SIZE") {
            None => DEFAULT_DB_POOL_MAX_SIZE,
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "DB_POOL_MAX_SIZE",
                message: format!("{e}"),
            })?,
        };

        let lookup_timeout_seconds = match get("LOOKUP_TIMEOUT_SECONDS") {
            None => DEFAULT_LOOKUP_TIMEOUT_SECONDS,
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: "LOOKUP_TIMEOUT_SECONDS",
                message: format!("{e}"),
            })?,
        };

        Ok(Self {
            database_url,
            lookup_api_url,
            bind_addr,
            db_pool_max_size,
            lookup_timeout: Duration::from_secs(lookup_timeout_seconds),
        })
    }
}
