//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GEOADDRESS_DATA_DIR` - Directory holding the blob store (default: `.geoaddress`)
//! - `GEOADDRESS_AUTH_LATENCY_MS` - Simulated sign-in/sign-up delay (default: 1000)
//! - `GEOADDRESS_LOCATE_LATENCY_MS` - Simulated location fix delay (default: 2000)
//! - `GEOADDRESS_RECENT_LIMIT` - Addresses shown in the recent preview (default: 3)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".geoaddress";
const DEFAULT_AUTH_LATENCY_MS: u64 = 1000;
const DEFAULT_LOCATE_LATENCY_MS: u64 = 2000;
const DEFAULT_RECENT_LIMIT: usize = 3;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Fixed delay before sign-in and sign-up resolve
    pub auth_latency: Duration,
    /// Fixed delay before a location fix resolves
    pub locate_latency: Duration,
    /// Number of addresses in the recent preview
    pub recent_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            auth_latency: Duration::from_millis(DEFAULT_AUTH_LATENCY_MS),
            locate_latency: Duration::from_millis(DEFAULT_LOCATE_LATENCY_MS),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("GEOADDRESS_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let auth_latency = parse_var(&lookup, "GEOADDRESS_AUTH_LATENCY_MS")?
            .map_or(defaults.auth_latency, Duration::from_millis);
        let locate_latency = parse_var(&lookup, "GEOADDRESS_LOCATE_LATENCY_MS")?
            .map_or(defaults.locate_latency, Duration::from_millis);
        let recent_limit =
            parse_var(&lookup, "GEOADDRESS_RECENT_LIMIT")?.unwrap_or(defaults.recent_limit);

        Ok(Self {
            data_dir,
            auth_latency,
            locate_latency,
            recent_limit,
        })
    }

    /// The same configuration with every simulated delay removed.
    #[must_use]
    pub fn without_latency(self) -> Self {
        Self {
            auth_latency: Duration::ZERO,
            locate_latency: Duration::ZERO,
            ..self
        }
    }
}

/// Parse an optional variable, treating blank values as unset.
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(None),
    }
}
