//! Configuration Module
//!
//! Loads server and cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Variable holding the cache TTL, e.g. `5m`.
pub const CACHE_EXPIRATION_VAR: &str = "API_CACHE_EXPIRATION";
/// Variable holding the sweep period, e.g. `1m`.
pub const CACHE_EVICTION_INTERVAL_VAR: &str = "API_CACHE_EVICTION_INTERVAL";
/// Variable holding the HTTP port.
pub const SERVER_PORT_VAR: &str = "SERVER_PORT";
/// Variable overriding the Internet Archive base URL.
pub const INTERNET_ARCHIVE_URL_VAR: &str = "INTERNET_ARCHIVE_URL";

const DEFAULT_SERVER_PORT: u16 = 3000;
/// Public Internet Archive endpoint.
pub const DEFAULT_INTERNET_ARCHIVE_URL: &str = "https://archive.org";

/// Server configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum age of a cache entry before the sweeper removes it
    pub cache_expiration: Duration,
    /// Period between two cache sweeps
    pub cache_eviction_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the Internet Archive APIs
    pub internet_archive_url: String,
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `API_CACHE_EXPIRATION` - cache TTL, required (`30s`, `5m`, ...)
    /// - `API_CACHE_EVICTION_INTERVAL` - sweep period, required
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `INTERNET_ARCHIVE_URL` - archive base URL (default: https://archive.org)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Both cache durations are required and must be positive.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_expiration = required_duration(&lookup, CACHE_EXPIRATION_VAR)?;
        let cache_eviction_interval = required_duration(&lookup, CACHE_EVICTION_INTERVAL_VAR)?;

        let server_port = match lookup(SERVER_PORT_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: SERVER_PORT_VAR,
                reason: format!("'{}' is not a valid port", raw),
            })?,
            None => DEFAULT_SERVER_PORT,
        };

        let internet_archive_url = lookup(INTERNET_ARCHIVE_URL_VAR)
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_INTERNET_ARCHIVE_URL.to_string());

        Ok(Self {
            cache_expiration,
            cache_eviction_interval,
            server_port,
            internet_archive_url,
        })
    }
}

fn required_duration<F>(lookup: &F, name: &'static str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).ok_or(ConfigError::Missing(name))?;
    let duration = humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    if duration.is_zero() {
        return Err(ConfigError::NonPositive(name));
    }
    Ok(duration)
}
