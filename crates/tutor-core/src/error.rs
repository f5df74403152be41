//! Error types for the tutor core.

use thiserror::Error;

/// Errors raised while building classifier or roadmap tables.
///
/// Classification and roadmap generation are total; only invalid
/// configuration data can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TutorError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TutorError {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using [`TutorError`].
pub type Result<T> = std::result::Result<T, TutorError>;
