use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Document store endpoint: a `postgres://` URL, or `memory://` for a process-local store.
    pub store_endpoint: String,
    /// Document store credential. Overrides any password embedded in the endpoint.
    pub store_key: Option<String>,
    pub database_name: String,
    pub container_name: String,
    /// Maximum store connections in the pool.
    pub store_max_connections: u32,
    /// Geolocation service base URL, e.g. `http://ipinfo.io`.
    pub geolocation_base_url: String,
    pub geolocation_token: String,
    pub geolocation_timeout: Duration,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            host: or_default("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 3030)?,
            store_endpoint: required("STORE_ENDPOINT")?,
            store_key: lookup("STORE_KEY").filter(|k| !k.is_empty()),
            database_name: or_default("DATABASE_NAME", "UserDataDB"),
            container_name: or_default("CONTAINER_NAME", "UserLocations"),
            store_max_connections: parse(&lookup, "STORE_MAX_CONNECTIONS", 10)?,
            geolocation_base_url: or_default("GEOLOCATION_BASE_URL", "http://ipinfo.io"),
            geolocation_token: required("GEOLOCATION_TOKEN")?,
            geolocation_timeout: Duration::from_secs(parse(&lookup, "GEOLOCATION_TIMEOUT_SECS", 10)?),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            log_level: or_default("LOG_LEVEL", "info"),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.store_endpoint.starts_with("memory:")
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
