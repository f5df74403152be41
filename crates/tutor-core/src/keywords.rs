//! Ordered keyword tables used by the goal classifier.
//!
//! A table is a list of `(label, keywords)` rules rather than a map so that
//! the first matching rule wins in declaration order. Matching is a
//! case-insensitive substring test; keywords are lowercased once when a rule
//! is built or deserialized.

use crate::error::{Result, TutorError};
use crate::types::{GoalType, Subject};
use serde::{Deserialize, Deserializer, Serialize};

/// A label and the substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule<L> {
    /// Value produced when a keyword matches.
    pub label: L,
    /// Substrings to look for, lowercase.
    #[serde(deserialize_with = "lowercase_keywords")]
    pub keywords: Vec<String>,
}

fn lowercase_keywords<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keywords = Vec::<String>::deserialize(deserializer)?;
    Ok(keywords.iter().map(|kw| kw.to_lowercase()).collect())
}

impl<L> KeywordRule<L> {
    /// Create a rule from a label and keyword list.
    pub fn new<I, S>(label: L, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            keywords: keywords
                .into_iter()
                .map(|kw| Into::<String>::into(kw).to_lowercase())
                .collect(),
        }
    }

    /// Does any keyword occur in `haystack`? `haystack` must already be lowercase.
    fn matches(&self, haystack: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| haystack.contains(kw.as_str()))
    }
}

/// Ordered list of keyword rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable<L> {
    rules: Vec<KeywordRule<L>>,
}

impl<L: Copy> KeywordTable<L> {
    /// Build a table from rules in priority order.
    pub fn new(rules: Vec<KeywordRule<L>>) -> Self {
        Self { rules }
    }

    /// Label of the first rule with a keyword contained in `text`.
    pub fn resolve(&self, text: &str) -> Option<L> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&haystack))
            .map(|rule| rule.label)
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[KeywordRule<L>] {
        &self.rules
    }

    fn validate(&self, table: &str) -> Result<()>
    where
        L: std::fmt::Debug,
    {
        for rule in &self.rules {
            if rule.keywords.is_empty() {
                return Err(TutorError::config(format!(
                    "{table} rule {:?} has no keywords",
                    rule.label
                )));
            }
            if rule.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(TutorError::config(format!(
                    "{table} rule {:?} contains an empty keyword",
                    rule.label
                )));
            }
        }
        Ok(())
    }
}

/// Keyword tables driving duration and subject classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Duration classes, checked in order.
    #[serde(default = "default_durations")]
    pub durations: KeywordTable<GoalType>,
    /// Subjects, checked in order.
    #[serde(default = "default_subjects")]
    pub subjects: KeywordTable<Subject>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            durations: default_durations(),
            subjects: default_subjects(),
        }
    }
}

impl ClassifierConfig {
    /// Check that every rule has at least one non-empty keyword and that
    /// the fallback subject is not used as a rule label.
    pub fn validate(&self) -> Result<()> {
        self.durations.validate("duration")?;
        self.subjects.validate("subject")?;

        if self.subjects.rules().iter().any(|r| r.label == Subject::Other) {
            return Err(TutorError::config(
                "subject table must not contain the fallback subject `other`",
            ));
        }
        Ok(())
    }
}

// English keywords first, then the Korean terms the service shipped with.
fn default_durations() -> KeywordTable<GoalType> {
    KeywordTable::new(vec![
        KeywordRule::new(
            GoalType::ShortTerm,
            ["week", "1wk", "short", "fast", "일주일", "1주", "단기", "빠른"],
        ),
        KeywordRule::new(
            GoalType::MediumTerm,
            ["month", "1mo", "medium", "moderate", "한달", "1개월", "중기", "보통"],
        ),
        KeywordRule::new(
            GoalType::LongTerm,
            ["semester", "grade", "year", "long", "extended", "학기", "학년", "장기", "오래"],
        ),
    ])
}

fn default_subjects() -> KeywordTable<Subject> {
    KeywordTable::new(vec![
        KeywordRule::new(
            Subject::Math,
            ["math", "calculation", "problem", "formula", "수학", "계산", "문제", "공식"],
        ),
        KeywordRule::new(
            Subject::English,
            ["english", "vocabulary", "grammar", "conversation", "영어", "단어", "문법", "회화"],
        ),
        KeywordRule::new(
            Subject::Korean,
            ["korean", "reading", "writing", "literature", "국어", "독서", "작문", "문학"],
        ),
        KeywordRule::new(
            Subject::Science,
            [
                "science", "experiment", "physics", "chemistry", "biology",
                "과학", "실험", "물리", "화학", "생물",
            ],
        ),
        KeywordRule::new(
            Subject::SocialStudies,
            ["social", "history", "geography", "politics", "사회", "역사", "지리", "정치"],
        ),
        KeywordRule::new(
            Subject::ArtsPe,
            [
                "music", "drawing", "painting", "physical education", "sports", "exercise",
                "음악", "미술", "체육", "운동",
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_first_rule_wins() {
        let table = KeywordTable::new(vec![
            KeywordRule::new(1u8, ["alpha"]),
            KeywordRule::new(2u8, ["beta", "alpha"]),
        ]);
        assert_eq!(table.resolve("alpha and beta"), Some(1));
        assert_eq!(table.resolve("only beta"), Some(2));
        assert_eq!(table.resolve("gamma"), None);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = KeywordTable::new(vec![KeywordRule::new(Subject::English, ["Grammar"])]);
        assert_eq!(table.resolve("GRAMMAR drills"), Some(Subject::English));
    }

    #[test]
    fn test_default_tables_are_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_table_order() {
        let config = ClassifierConfig::default();
        let durations: Vec<_> = config.durations.rules().iter().map(|r| r.label).collect();
        assert_eq!(durations, GoalType::ALL.to_vec());

        let subjects: Vec<_> = config.subjects.rules().iter().map(|r| r.label).collect();
        assert_eq!(&subjects[..], &Subject::ALL[..6]);
    }

    #[test]
    fn test_validate_rejects_empty_keyword() {
        let config = ClassifierConfig {
            durations: KeywordTable::new(vec![KeywordRule::new(GoalType::ShortTerm, [" "])]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TutorError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_rule_without_keywords() {
        let config = ClassifierConfig {
            subjects: KeywordTable::new(vec![KeywordRule::new(Subject::Math, Vec::<String>::new())]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_other_label() {
        let config = ClassifierConfig {
            subjects: KeywordTable::new(vec![KeywordRule::new(Subject::Other, ["misc"])]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn test_deserialize_table_from_json() {
        let json = r#"{
            "subjects": [
                {"label": "science", "keywords": ["lab"]},
                {"label": "math", "keywords": ["lab", "algebra"]}
            ]
        }"#;
        let config: ClassifierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.subjects.resolve("lab report"), Some(Subject::Science));
        assert_eq!(config.durations, default_durations());
    }

    #[test]
    fn test_keywords_are_stored_lowercase() {
        let rule = KeywordRule::new(Subject::English, ["Grammar", "TOEFL"]);
        assert_eq!(rule.keywords, ["grammar", "toefl"]);

        let json = r#"{"subjects": [{"label": "science", "keywords": ["Lab"]}]}"#;
        let config: ClassifierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.subjects.rules()[0].keywords, ["lab"]);
        assert_eq!(config.subjects.resolve("LAB report"), Some(Subject::Science));
        assert_eq!(config.durations, default_durations());
    }
}
