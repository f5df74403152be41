//! Roadmap generation from a single structured goal.

use crate::error::{Result, TutorError};
use crate::types::{GoalType, RoadmapGoal, RoadmapStep, StepStatus, Subject};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Most phases a single template may list.
pub const MAX_TEMPLATE_PHASES: usize = 5;

static DEFAULT_GENERATOR: Lazy<RoadmapGenerator> = Lazy::new(RoadmapGenerator::default);

/// Generate a roadmap with the built-in templates.
pub fn generate(goal: &RoadmapGoal) -> Vec<RoadmapStep> {
    DEFAULT_GENERATOR.generate(goal)
}

/// Maximum number of steps per duration class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCeilings {
    /// Short-term goals.
    #[serde(default = "default_short_term")]
    pub short_term: usize,
    /// Medium-term goals.
    #[serde(default = "default_medium_term")]
    pub medium_term: usize,
    /// Long-term goals.
    #[serde(default = "default_long_term")]
    pub long_term: usize,
    /// Goals whose duration class was not recognised.
    #[serde(default = "default_medium_term")]
    pub unknown: usize,
}

fn default_short_term() -> usize {
    3
}

fn default_medium_term() -> usize {
    5
}

fn default_long_term() -> usize {
    8
}

impl Default for StepCeilings {
    fn default() -> Self {
        Self {
            short_term: default_short_term(),
            medium_term: default_medium_term(),
            long_term: default_long_term(),
            unknown: default_medium_term(),
        }
    }
}

impl StepCeilings {
    fn validate(&self) -> Result<()> {
        let ceilings = [
            ("short_term", self.short_term),
            ("medium_term", self.medium_term),
            ("long_term", self.long_term),
            ("unknown", self.unknown),
        ];
        match ceilings.iter().find(|(_, ceiling)| *ceiling == 0) {
            Some((name, _)) => Err(TutorError::config(format!(
                "roadmap step ceiling `{name}` must be at least 1"
            ))),
            None => Ok(()),
        }
    }

    /// Ceiling for a goal type; `None` uses the `unknown` entry.
    pub fn for_goal_type(&self, goal_type: Option<GoalType>) -> usize {
        match goal_type {
            Some(GoalType::ShortTerm) => self.short_term,
            Some(GoalType::MediumTerm) => self.medium_term,
            Some(GoalType::LongTerm) => self.long_term,
            None => self.unknown,
        }
    }
}

/// Ordered phase names for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTemplate {
    /// Subject the template applies to.
    pub subject: Subject,
    /// Phase names, in study order.
    pub phases: Vec<String>,
}

impl SubjectTemplate {
    fn new(subject: Subject, phases: [&str; 5]) -> Self {
        Self {
            subject,
            phases: phases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Tables driving roadmap generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Step ceilings per duration class.
    #[serde(default)]
    pub step_ceilings: StepCeilings,
    /// Per-subject templates. The first entry for a subject wins.
    #[serde(default = "default_templates")]
    pub templates: Vec<SubjectTemplate>,
    /// Template for subjects without an entry, including `other`.
    #[serde(default = "default_fallback")]
    pub fallback: Vec<String>,
    /// Duration label attached to every step.
    #[serde(default = "default_step_duration")]
    pub step_duration: String,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            step_ceilings: StepCeilings::default(),
            templates: default_templates(),
            fallback: default_fallback(),
            step_duration: default_step_duration(),
        }
    }
}

impl RoadmapConfig {
    /// Phase names for `subject`.
    pub fn template_for(&self, subject: Subject) -> &[String] {
        self.templates
            .iter()
            .find(|t| t.subject == subject)
            .map(|t| t.phases.as_slice())
            .unwrap_or(self.fallback.as_slice())
    }

    /// Reject zero ceilings, empty or oversized templates, empty phase names
    /// and an empty duration label.
    pub fn validate(&self) -> Result<()> {
        self.step_ceilings.validate()?;

        if self.step_duration.trim().is_empty() {
            return Err(TutorError::config("roadmap step duration label is empty"));
        }

        let phases = self
            .templates
            .iter()
            .map(|t| (t.subject.as_str(), &t.phases))
            .chain(std::iter::once(("fallback", &self.fallback)));

        for (name, phases) in phases {
            if phases.is_empty() {
                return Err(TutorError::config(format!("roadmap template `{name}` is empty")));
            }
            if phases.len() > MAX_TEMPLATE_PHASES {
                return Err(TutorError::config(format!(
                    "roadmap template `{name}` has {} phases, at most {MAX_TEMPLATE_PHASES} allowed",
                    phases.len()
                )));
            }
            if phases.iter().any(|p| p.trim().is_empty()) {
                return Err(TutorError::config(format!(
                    "roadmap template `{name}` contains an empty phase"
                )));
            }
        }
        Ok(())
    }
}

fn default_step_duration() -> String {
    "1 week".to_string()
}

fn default_fallback() -> Vec<String> {
    [
        "phase 1 study",
        "phase 2 practice",
        "phase 3 application",
        "phase 4 deepening",
        "phase 5 mastery",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn default_templates() -> Vec<SubjectTemplate> {
    vec![
        SubjectTemplate::new(
            Subject::Math,
            [
                "foundational concepts",
                "practice problems",
                "applied problems",
                "error review",
                "advanced problems",
            ],
        ),
        SubjectTemplate::new(
            Subject::English,
            [
                "vocabulary",
                "grammar",
                "reading comprehension",
                "conversation practice",
                "practice test",
            ],
        ),
        SubjectTemplate::new(
            Subject::Korean,
            [
                "reading activities",
                "literature appreciation",
                "writing practice",
                "grammar study",
                "reading comprehension",
            ],
        ),
        SubjectTemplate::new(
            Subject::Science,
            [
                "concept understanding",
                "experiments and observation",
                "theory summary",
                "problem solving",
                "advanced study",
            ],
        ),
        SubjectTemplate::new(
            Subject::SocialStudies,
            [
                "concept study",
                "case analysis",
                "map study",
                "problem solving",
                "in-depth inquiry",
            ],
        ),
        SubjectTemplate::new(
            Subject::ArtsPe,
            [
                "basic practice",
                "skill building",
                "creative activity",
                "expression development",
                "finishing touches",
            ],
        ),
    ]
}

/// Expands a goal into an ordered list of study steps.
#[derive(Debug, Clone, Default)]
pub struct RoadmapGenerator {
    config: RoadmapConfig,
}

impl RoadmapGenerator {
    /// Create a generator over the given tables.
    pub fn new(config: RoadmapConfig) -> Self {
        Self { config }
    }

    /// Tables in use.
    pub fn config(&self) -> &RoadmapConfig {
        &self.config
    }

    /// Build the roadmap for `goal`.
    ///
    /// The step count is the smaller of the duration-class ceiling and the
    /// template length.
    pub fn generate(&self, goal: &RoadmapGoal) -> Vec<RoadmapStep> {
        let ceiling = self.config.step_ceilings.for_goal_type(goal.goal_type);
        let template = self.config.template_for(goal.subject);
        let count = ceiling.min(template.len());

        debug!(
            subject = %goal.subject,
            ceiling,
            template_len = template.len(),
            count,
            "Generating roadmap"
        );

        template
            .iter()
            .take(count)
            .zip(1u32..)
            .map(|(phase, step)| RoadmapStep {
                step,
                title: phase.clone(),
                description: format!("{} step {}", goal.title, step),
                duration: self.config.step_duration.clone(),
                status: StepStatus::Pending,
            })
            .collect()
    }
}
