//! Server configuration types.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tutor_core::{ClassifierConfig, RoadmapConfig};

use super::validation::ConfigError;

/// Main server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration.
    #[serde(default)]
    pub server: ServerBindConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Keyword tables for goal classification.
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Templates for roadmap generation.
    #[serde(default)]
    pub roadmap: RoadmapConfig,
}

impl ServerConfig {
    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.socket_addr()
    }
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerBindConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Request timeout.
    pub request_timeout_secs: u64,
    /// Maximum request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerBindConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerBindConfig {
    /// Parse `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: String,
    /// Log format (pretty, compact or json).
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,
    /// Request headers allowed on preflight. Empty or `*` echoes whatever
    /// the browser asks for.
    pub allowed_headers: Vec<String>,
    /// Allow credentials.
    pub allow_credentials: bool,
    /// Max age for preflight cache.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            allowed_headers: Vec::new(),
            allow_credentials: true,
            max_age_secs: 86400,
        }
    }
}
