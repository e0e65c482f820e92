//! API server configuration
//! Loaded from environment variables (after `.env`) at startup

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Log output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("API_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid API_PORT: {} ({})", raw, e))
            })?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::InvalidConfig(
                "API_PORT must be between 1 and 65535".to_string(),
            ));
        }

        let bind_addr: SocketAddr = format!("{}:{}", host.trim(), port)
            .parse()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid API_HOST: {} ({})", host, e)))?;

        let allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid MAX_BODY_BYTES: {} ({})", raw, e))
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        if !(MIN_BODY_BYTES..=MAX_BODY_BYTES).contains(&max_body_bytes) {
            return Err(ConfigError::InvalidConfig(format!(
                "MAX_BODY_BYTES must be between {} and {}",
                MIN_BODY_BYTES, MAX_BODY_BYTES
            )));
        }

        let log_format = match lookup("LOG_FORMAT")
            .map(|raw| raw.trim().to_lowercase())
            .as_deref()
        {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidConfig(format!(
                    "Invalid LOG_FORMAT: {} (expected pretty or json)",
                    other
                )))
            }
        };

        Ok(Self {
            bind_addr,
            allowed_origins,
            max_body_bytes,
            log_format,
        })
    }
}
