//! Configuration loading utilities.

use super::types::ServerConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Load configuration from embedded defaults, an optional file and the
/// environment, in that order of precedence (last wins).
pub struct ConfigLoader {
    config_path: Option<String>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader with no config file and the `TUTOR` env prefix.
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "TUTOR".to_string(),
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(path) = &self.config_path {
            if Path::new(path).exists() {
                info!(path = %path, "Loading config file");
                builder = builder.add_source(config::File::with_name(path));
            } else {
                warn!(path = %path, "Config file not found, using defaults");
            }
        }

        // TUTOR__SERVER__PORT=9000, TUTOR__CORS__ALLOWED_ORIGINS=a,b
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .with_list_parse_key("cors.allowed_headers")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration, reading the optional file path from `CONFIG_PATH`.
pub fn load_config() -> Result<ServerConfig> {
    let mut loader = ConfigLoader::new();
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        loader = loader.with_config_path(path);
    }

    loader.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tutor_core::{GoalType, Subject};

    // Unique prefix so ambient TUTOR__* variables do not leak in.
    const TEST_PREFIX: &str = "TUTOR_LOADER_TEST";

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::new()
            .with_env_prefix(TEST_PREFIX)
            .load()
            .unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.cors.allowed_origins,
            ["http://localhost:3000", "http://localhost:5173"]
        );
        assert_eq!(config.classifier, tutor_core::ClassifierConfig::default());
        assert_eq!(config.roadmap, tutor_core::RoadmapConfig::default());
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[[classifier.subjects]]
label = "science"
keywords = ["robot"]

[roadmap]
step_duration = "2 weeks"

[roadmap.step_ceilings]
short_term = 2
"#
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_env_prefix(TEST_PREFIX)
            .with_config_path(file.path().to_string_lossy())
            .load()
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.classifier.subjects.resolve("build a robot"), Some(Subject::Science));
        assert_eq!(config.classifier.subjects.resolve("math"), None);
        assert_eq!(config.roadmap.step_duration, "2 weeks");
        assert_eq!(config.roadmap.step_ceilings.for_goal_type(Some(GoalType::ShortTerm)), 2);
        assert_eq!(config.roadmap.step_ceilings.for_goal_type(Some(GoalType::LongTerm)), 8);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ConfigLoader::new()
            .with_env_prefix(TEST_PREFIX)
            .with_config_path("/nonexistent/tutor.toml")
            .load()
            .unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
