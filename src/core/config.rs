//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that is
//! populated once at startup from environment variables (and an optional
//! `.env` file), then shared read-only with every tool handler.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

use super::error::{Error, Result};

/// Environment variable holding the ean-search.org API token.
pub const API_TOKEN_ENV: &str = "EAN_SEARCH_API_TOKEN";

const DEFAULT_BASE_URL: &str = "https://api.ean-search.org/api";
const DEFAULT_LANGUAGE: u8 = 1;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Remote API endpoint settings.
    pub api: ApiConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Settings for the ean-search.org HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint every operation is sent to.
    pub base_url: String,

    /// Language id for product names (1 = English, 3 = German, ...).
    pub language: u8,

    /// Per-request timeout applied by the HTTP client.
    pub timeout_secs: u64,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// ean-search.org API token.
    /// Get one at: https://www.ean-search.org/ean-database-api.html
    pub ean_search_api_token: Option<String>,
}

impl CredentialsConfig {
    /// The token, if one is configured and non-empty.
    pub fn api_token(&self) -> Option<&str> {
        self.ean_search_api_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "ean_search_api_token",
                &self.ean_search_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read the logging section alone, so the subscriber can be installed
    /// before the rest of the configuration is loaded and reported on.
    pub fn from_env() -> Self {
        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "eansearch".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            api: ApiConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default configuration carrying the given API token.
    pub fn with_api_token(token: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.credentials.ean_search_api_token = Some(token.into());
        config
    }

    /// Load configuration from environment variables.
    ///
    /// Reports the token status and any ignored values through `tracing`, so
    /// the subscriber should already be installed from [`LoggingConfig::from_env`].
    /// The API token is read from `EAN_SEARCH_API_TOKEN`; everything else
    /// uses `MCP_`-prefixed variables such as `MCP_SERVER_NAME` or
    /// `MCP_EAN_SEARCH_LANGUAGE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_EAN_SEARCH_BASE_URL") {
            config.api.base_url = base_url;
        }

        config.api.language = parse_env("MCP_EAN_SEARCH_LANGUAGE", DEFAULT_LANGUAGE);
        config.api.timeout_secs = parse_env("MCP_EAN_SEARCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        match std::env::var(API_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => {
                config.credentials.ean_search_api_token = Some(token);
                info!("ean-search.org API token loaded from environment");
            }
            _ => {
                warn!(
                    "{} not set - every tool call will return setup instructions \
                     (get a token at https://www.ean-search.org/ean-database-api.html)",
                    API_TOKEN_ENV
                );
            }
        }

        config
    }

    /// Reject settings the HTTP client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(Error::config(format!(
                "API base URL must be http(s), got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::config("API timeout must be at least one second"));
        }
        Ok(())
    }
}

/// Read and parse a numeric environment variable, falling back on bad input.
fn parse_env<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
