//! Free-text goal classification.

use crate::keywords::ClassifierConfig;
use crate::types::{truncate_title, GoalRecord, GoalType, Subject};
use once_cell::sync::Lazy;
use tracing::debug;

static DEFAULT_CLASSIFIER: Lazy<GoalClassifier> = Lazy::new(GoalClassifier::default);

/// Classify `text` with the built-in keyword tables.
pub fn classify(text: &str) -> Vec<GoalRecord> {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Turns free text, one goal per line, into structured goal records.
#[derive(Debug, Clone, Default)]
pub struct GoalClassifier {
    config: ClassifierConfig,
}

impl GoalClassifier {
    /// Create a classifier over the given keyword tables.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Keyword tables in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify every non-blank line of `text`.
    ///
    /// Never returns an empty list: input without goals yields a single
    /// [`GoalRecord::placeholder`].
    pub fn classify(&self, text: &str) -> Vec<GoalRecord> {
        let mut goals: Vec<GoalRecord> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.classify_line(line))
            .collect();

        if goals.is_empty() {
            debug!("No goals found in input, using placeholder");
            goals.push(GoalRecord::placeholder());
        }

        goals
    }

    /// Classify a single, already trimmed, non-blank line.
    pub fn classify_line(&self, line: &str) -> GoalRecord {
        let goal_type = self.goal_type(line);
        let subject = self.subject(line);

        debug!(%goal_type, %subject, "Classified goal line");

        GoalRecord {
            title: truncate_title(line),
            description: describe(subject),
            goal_type,
            subject,
        }
    }

    /// Duration class for `line`, falling back to medium term.
    pub fn goal_type(&self, line: &str) -> GoalType {
        self.config.durations.resolve(line).unwrap_or_default()
    }

    /// Subject for `line`, falling back to [`Subject::Other`].
    pub fn subject(&self, line: &str) -> Subject {
        self.config.subjects.resolve(line).unwrap_or_default()
    }
}

fn describe(subject: Subject) -> String {
    format!("{} related study goal", subject.label())
}
