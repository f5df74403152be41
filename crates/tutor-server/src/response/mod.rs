//! Response bodies.

use serde::Serialize;
use tutor_core::{GoalRecord, RoadmapStep};

/// Body of a successful `POST /structure-goals`.
#[derive(Debug, Serialize)]
pub struct StructureGoalsResponse {
    /// One record per non-blank input line, or the placeholder.
    pub structured_goals: Vec<GoalRecord>,
    /// Fixed success message.
    pub message: String,
}

impl StructureGoalsResponse {
    /// Wrap classified goals with the success message.
    pub fn new(structured_goals: Vec<GoalRecord>) -> Self {
        Self {
            structured_goals,
            message: "Goals structured successfully.".to_string(),
        }
    }
}

/// Body of a successful `POST /generate-roadmap`.
#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    /// Ordered steps, numbered from 1.
    pub roadmap: Vec<RoadmapStep>,
    /// Fixed success message.
    pub message: String,
}

impl RoadmapResponse {
    /// Wrap generated steps with the success message.
    pub fn new(roadmap: Vec<RoadmapStep>) -> Self {
        Self {
            roadmap,
            message: "Roadmap generated successfully.".to_string(),
        }
    }
}

/// Plain `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Body carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
