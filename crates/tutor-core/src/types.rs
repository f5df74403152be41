//! Domain types shared by the classifier, the roadmap generator and the API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

/// Marker appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Duration class of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// About a week.
    ShortTerm,
    /// About a month. Used when no duration keyword matches.
    #[default]
    MediumTerm,
    /// A semester or school year.
    LongTerm,
}

impl GoalType {
    /// All duration classes, in declaration order.
    pub const ALL: [GoalType; 3] = [Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    /// Wire name (`short_term`, `medium_term`, `long_term`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }

    /// Parse an exact wire name. Returns `None` for anything else,
    /// including other casings.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// School subject used to pick a roadmap template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// Mathematics.
    Math,
    /// English as a foreign language.
    English,
    /// Korean language and literature.
    Korean,
    /// Physics, chemistry, biology.
    Science,
    /// History, geography, politics.
    SocialStudies,
    /// Music, fine arts, physical education.
    ArtsPe,
    /// Sentinel for goals no subject keyword matched.
    #[default]
    Other,
}

impl Subject {
    /// All subjects, in declaration order.
    pub const ALL: [Subject; 7] = [
        Self::Math,
        Self::English,
        Self::Korean,
        Self::Science,
        Self::SocialStudies,
        Self::ArtsPe,
        Self::Other,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::English => "english",
            Self::Korean => "korean",
            Self::Science => "science",
            Self::SocialStudies => "social_studies",
            Self::ArtsPe => "arts_pe",
            Self::Other => "other",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::English => "English",
            Self::Korean => "Korean",
            Self::Science => "Science",
            Self::SocialStudies => "Social Studies",
            Self::ArtsPe => "Arts & PE",
            Self::Other => "Other",
        }
    }

    /// Parse an exact wire name. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.as_str() == s)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured learning goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Source line, at most [`MAX_TITLE_CHARS`] characters.
    pub title: String,
    /// Templated description referencing the subject.
    pub description: String,
    /// Duration class.
    pub goal_type: GoalType,
    /// Resolved subject.
    pub subject: Subject,
}

impl GoalRecord {
    /// Record emitted when the input contains no goals.
    pub fn placeholder() -> Self {
        Self {
            title: "Set a learning goal".to_string(),
            description: "Please set a concrete learning goal".to_string(),
            goal_type: GoalType::MediumTerm,
            subject: Subject::Other,
        }
    }
}

/// Progress state of a roadmap step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not started. The only state the generator produces.
    #[default]
    Pending,
}

/// One phase of a generated study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    /// 1-based position.
    pub step: u32,
    /// Phase name from the subject template.
    pub title: String,
    /// `"{goal title} step {n}"`.
    pub description: String,
    /// Duration label.
    pub duration: String,
    /// Always [`StepStatus::Pending`] on creation.
    pub status: StepStatus,
}

/// Input to the roadmap generator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoadmapGoal {
    /// Goal title, echoed into each step description.
    pub title: String,
    /// Goal description.
    pub description: String,
    /// Duration class; `None` when the caller sent an unrecognised value.
    pub goal_type: Option<GoalType>,
    /// Subject used for template lookup.
    pub subject: Subject,
    /// Optional target date, passed through untouched.
    pub target_date: Option<String>,
}

impl From<&GoalRecord> for RoadmapGoal {
    fn from(record: &GoalRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            goal_type: Some(record.goal_type),
            subject: record.subject,
            target_date: None,
        }
    }
}

/// Truncate a title to [`MAX_TITLE_CHARS`] characters, replacing the tail
/// with [`ELLIPSIS`] when it is longer.
pub fn truncate_title(line: &str) -> String {
    if line.chars().count() <= MAX_TITLE_CHARS {
        return line.to_string();
    }

    let keep = MAX_TITLE_CHARS - ELLIPSIS.chars().count();
    let mut title: String = line.chars().take(keep).collect();
    title.push_str(ELLIPSIS);
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_type_parse() {
        assert_eq!(GoalType::parse("short_term"), Some(GoalType::ShortTerm));
        assert_eq!(GoalType::parse("long_term"), Some(GoalType::LongTerm));
        assert_eq!(GoalType::parse("SHORT_TERM"), None);
        assert_eq!(GoalType::parse(" short_term "), None);
        assert_eq!(GoalType::parse("yearly"), None);
        assert_eq!(GoalType::default(), GoalType::MediumTerm);
    }

    #[test]
    fn test_subject_parse_and_label() {
        assert_eq!(Subject::parse("social_studies"), Some(Subject::SocialStudies));
        assert_eq!(Subject::parse("arts_pe"), Some(Subject::ArtsPe));
        assert_eq!(Subject::parse("Arts_PE"), None);
        assert_eq!(Subject::parse("chemistry"), None);
        assert_eq!(Subject::ArtsPe.label(), "Arts & PE");
        assert_eq!(Subject::default(), Subject::Other);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Subject::SocialStudies).unwrap();
        assert_eq!(json, "\"social_studies\"");

        let json = serde_json::to_string(&GoalType::LongTerm).unwrap();
        assert_eq!(json, "\"long_term\"");

        let json = serde_json::to_string(&StepStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_truncate_title_short_line_untouched() {
        assert_eq!(truncate_title("Finish the workbook"), "Finish the workbook");
        let exact = "x".repeat(MAX_TITLE_CHARS);
        assert_eq!(truncate_title(&exact), exact);
    }

    #[test]
    fn test_truncate_title_counts_chars_not_bytes() {
        let line = "수".repeat(60);
        let title = truncate_title(&line);
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.ends_with(ELLIPSIS));
        assert!(title.starts_with(&"수".repeat(47)));
    }

    #[test]
    fn test_roadmap_goal_from_record() {
        let record = GoalRecord {
            title: "Science fair".into(),
            description: "Science related study goal".into(),
            goal_type: GoalType::LongTerm,
            subject: Subject::Science,
        };
        let goal = RoadmapGoal::from(&record);
        assert_eq!(goal.goal_type, Some(GoalType::LongTerm));
        assert_eq!(goal.subject, Subject::Science);
        assert_eq!(goal.title, "Science fair");
    }
}
