//! Tutor core: rule-based goal classification and roadmap generation.
//!
//! Everything in this crate is a pure, synchronous function of its input.
//!
//! - [`GoalClassifier`] turns free text (one goal per line) into [`GoalRecord`]s.
//! - [`RoadmapGenerator`] expands a single goal into ordered [`RoadmapStep`]s.
//!
//! Keyword and template tables are plain data ([`ClassifierConfig`],
//! [`RoadmapConfig`]) so they can be replaced from configuration without
//! touching the matching logic.

#![warn(missing_docs)]

pub mod classifier;
pub mod error;
pub mod keywords;
pub mod roadmap;
pub mod types;

pub use classifier::{classify, GoalClassifier};
pub use error::{Result, TutorError};
pub use keywords::{ClassifierConfig, KeywordRule, KeywordTable};
pub use roadmap::{generate, RoadmapConfig, MAX_TEMPLATE_PHASES, RoadmapGenerator, StepCeilings, SubjectTemplate};
pub use types::*;
