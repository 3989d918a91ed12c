//! Process configuration.
//!
//! Read once at startup from the environment (optionally seeded from a `.env` file),
//! then overridden by command-line flags.

use axum::http::HeaderValue;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// MongoDB connection string.
pub const ENV_MONGO_URI: &str = "URL_API";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_CORS_ORIGIN: &str = "CORS_ORIGIN";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_CORS_ORIGIN: &str = "https://algo-project-duhl.vercel.app";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },

    #[error("invalid CORS origin `{0}`")]
    InvalidCorsOrigin(String),

    #[error("missing value for {0}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub mongo_uri: Option<String>,
    pub cors_origin: HeaderValue,
    /// Forces the in-memory store even when a connection string is set.
    pub use_memory_store: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr =
            parse_bind(&get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()))?;
        let cors_origin = parse_origin(
            &get(ENV_CORS_ORIGIN).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        )?;

        Ok(Self {
            bind_addr,
            mongo_uri: get(ENV_MONGO_URI),
            cors_origin,
            use_memory_store: false,
        })
    }

    /// Applies `--bind <addr:port>` and `--memory`. Unknown arguments are ignored.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self, ConfigError> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| ConfigError::MissingValue("--bind".to_string()))?;
                    self.bind_addr = parse_bind(value)?;
                    i += 2;
                }
                "--memory" => {
                    self.use_memory_store = true;
                    i += 1;
                }
                _ => {
                    i += 1;
                }
            }
        }
        Ok(self)
    }
}

fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidBindAddr {
            value: value.to_string(),
            source,
        })
}

fn parse_origin(value: &str) -> Result<HeaderValue, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    HeaderValue::from_str(trimmed).map_err(|_| ConfigError::InvalidCorsOrigin(value.to_string()))
}
