//! Shared application state.

use crate::config::ServerConfig;
use std::sync::Arc;
use tutor_core::{GoalClassifier, RoadmapGenerator};

/// State handed to every handler. Read-only after construction.
#[derive(Clone, Default)]
pub struct AppState {
    /// Goal classifier built from `[classifier]`.
    pub classifier: Arc<GoalClassifier>,
    /// Roadmap generator built from `[roadmap]`.
    pub roadmap: Arc<RoadmapGenerator>,
}

impl AppState {
    /// Build the engines from the configured tables.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            classifier: Arc::new(GoalClassifier::new(config.classifier.clone())),
            roadmap: Arc::new(RoadmapGenerator::new(config.roadmap.clone())),
        }
    }
}
