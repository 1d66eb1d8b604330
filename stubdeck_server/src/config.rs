//! Server configuration loaded from environment variables

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port serving the mapping API and page
    pub port: u16,

    /// Port of the local WireMock instance
    pub wiremock_port: u16,

    /// WireMock admin base URL (e.g., "http://localhost:8089/__admin")
    pub admin_base: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_port(lookup("PORT"), 9090)?;
        let wiremock_port = parse_port(lookup("WIREMOCK_PORT"), 8089)?;

        // Explicit override, else derive from the local WireMock port
        let admin_base = lookup("WIREMOCK_ADMIN_BASE")
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}/__admin", wiremock_port));

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            wiremock_port,
            admin_base: admin_base.trim_end_matches('/').to_string(),
        })
    }
}

fn parse_port(value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidPort(v)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}
