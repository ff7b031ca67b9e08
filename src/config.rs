//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Base URL of the downstream FSPIOP endpoint
    pub downstream_url: String,

    /// Participant identifier stamped on outbound requests (FSPIOP-Source)
    pub source_fsp_id: String,

    /// Default destination participant (FSPIOP-Destination) when the
    /// request does not name one
    pub destination_fsp_id: String,

    /// Interoperability API version string for content-type headers
    pub protocol_version: String,

    /// Timeout for the outbound downstream call itself
    pub downstream_timeout: Duration,

    /// How long a caller is held open waiting for the matching callback
    pub callback_wait: Duration,

    /// Interval between sweeps of expired correlation entries
    pub cleanup_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let downstream_url =
            env::var("DOWNSTREAM_URL").map_err(|_| ConfigError::MissingEnv("DOWNSTREAM_URL"))?;

        let source_fsp_id =
            env::var("SOURCE_FSP_ID").map_err(|_| ConfigError::MissingEnv("SOURCE_FSP_ID"))?;

        let destination_fsp_id =
            env::var("DESTINATION_FSP_ID").unwrap_or_else(|_| "switch".to_string());

        let protocol_version = env::var("PROTOCOL_VERSION").unwrap_or_else(|_| "1.1".to_string());

        let downstream_timeout = parse_millis("DOWNSTREAM_TIMEOUT_MS", "5000")?;
        let callback_wait = parse_millis("CALLBACK_WAIT_MS", "10000")?;
        let cleanup_interval = parse_millis("CLEANUP_INTERVAL_MS", "30000")?;

        Ok(Self {
            host,
            port,
            environment,
            downstream_url,
            source_fsp_id,
            destination_fsp_id,
            protocol_version,
            downstream_timeout,
            callback_wait,
            cleanup_interval,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_millis(name: &'static str, default: &str) -> Result<Duration, ConfigError> {
    let millis: u64 = env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name))?;
    Ok(Duration::from_millis(millis))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
