//! Configuration validation.

use super::types::ServerConfig;
use thiserror::Error;
use tutor_common_log::{LogFormat, LogLevel};
use tutor_core::TutorError;

/// A single configuration problem.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port 0.
    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    /// Host and port do not form a socket address.
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    /// Unknown log level name.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Unknown log format name.
    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),

    /// Origin is neither `*` nor an http(s) URL.
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    /// Keyword tables failed validation.
    #[error("Invalid classifier tables: {0}")]
    Classifier(#[source] TutorError),

    /// Roadmap tables failed validation.
    #[error("Invalid roadmap tables: {0}")]
    Roadmap(#[source] TutorError),
}

/// Validate server configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    } else if let Err(e) = config.server.socket_addr() {
        errors.push(e);
    }

    if LogLevel::parse(&config.logging.level).is_none() {
        errors.push(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    if LogFormat::parse(&config.logging.format).is_none() {
        errors.push(ConfigError::InvalidLogFormat(config.logging.format.clone()));
    }

    for origin in &config.cors.allowed_origins {
        let is_http = origin.starts_with("http://") || origin.starts_with("https://");
        if origin != "*" && !is_http {
            errors.push(ConfigError::InvalidOrigin(origin.clone()));
        }
    }

    if let Err(e) = config.classifier.validate() {
        errors.push(ConfigError::Classifier(e));
    }

    if let Err(e) = config.roadmap.validate() {
        errors.push(ConfigError::Roadmap(e));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::{KeywordRule, KeywordTable, Subject};

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;

        let result = validate_config(&config);
        assert!(result.unwrap_err().iter().any(|e| matches!(e, ConfigError::InvalidPort(0))));
    }

    #[test]
    fn test_invalid_host() {
        let mut config = ServerConfig::default();
        config.server.host = "not a host".to_string();

        let result = validate_config(&config);
        assert!(result.unwrap_err().iter().any(|e| matches!(e, ConfigError::InvalidAddress(_))));
    }

    #[test]
    fn test_invalid_log_settings() {
        let mut config = ServerConfig::default();
        config.logging.level = "loud".to_string();
        config.logging.format = "xml".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidLogLevel(_))));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidLogFormat(_))));
    }

    #[test]
    fn test_invalid_origin() {
        let mut config = ServerConfig::default();
        config.cors.allowed_origins.push("localhost:8080".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(&errors[0], ConfigError::InvalidOrigin(o) if o == "localhost:8080"));
    }

    #[test]
    fn test_invalid_tables() {
        let mut config = ServerConfig::default();
        config.classifier.subjects = KeywordTable::new(vec![KeywordRule::new(Subject::Other, ["x"])]);
        config.roadmap.fallback.clear();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::Classifier(_))));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::Roadmap(_))));
    }
}
