//! Application configuration module
//!
//! Loads settings from environment variables (and `.env` when present).

use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0),
            port: 3000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// View configuration
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Document title of the loading pages
    pub title: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "Loading…".to_string(),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub views: ViewConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let host = match lookup("HOST") {
            Some(h) => h
                .trim()
                .parse::<Ipv4Addr>()
                .map_err(|_| ConfigError::InvalidValue(format!("HOST '{}' is not an IPv4 address", h)))?,
            None => defaults.server.host,
        };

        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT '{}' is not a valid port", p)))?,
            None => defaults.server.port,
        };

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(raw) => Self::parse_origins(&raw)?,
            None => defaults.cors.allowed_origins,
        };

        let title = lookup("APP_TITLE")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or(defaults.views.title);

        Ok(Self {
            server: ServerConfig { host, port },
            cors: CorsConfig { allowed_origins },
            views: ViewConfig { title },
        })
    }

    /// Parse a comma-separated origin list (http://host:port,...)
    fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| match url::Url::parse(origin) {
                Ok(parsed) if parsed.host_str().is_some() => {
                    Ok(parsed.origin().ascii_serialization())
                }
                _ => Err(ConfigError::InvalidValue(format!(
                    "ALLOWED_ORIGINS entry '{}' is not an origin (expected http://host[:port])",
                    origin
                ))),
            })
            .collect()
    }
}
