//! Request data transfer objects and the validating JSON extractor.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tutor_core::{GoalType, RoadmapGoal, Subject};
use validator::{Validate, ValidationError};

/// Field name used for body-level shape errors.
pub const BODY_FIELD: &str = "body";

/// JSON body extractor that also runs `validator` rules.
///
/// Unparseable JSON maps to [`ApiError::BadRequest`]. A body that parses but
/// has the wrong shape (missing field, wrong type), or that breaks a rule,
/// maps to [`ApiError::ValidationError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;
        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let fields = HashMap::from([(BODY_FIELD.to_string(), vec![err.body_text()])]);
            ApiError::ValidationError(fields)
        }
        other => ApiError::BadRequest(other.body_text()),
    }
}

fn default_user_type() -> String {
    "parent".to_string()
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    match Subject::parse(subject) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("unknown_subject")
            .with_message(Cow::Owned(format!("unknown subject `{subject}`")))),
    }
}

/// Body of `POST /structure-goals`.
///
/// Input length is bounded only by the server's body limit.
#[derive(Debug, Deserialize, Validate)]
pub struct StructureGoalsRequest {
    /// Free text, one goal per line.
    pub user_input: String,
    /// Who is writing the goals (parent or child). Logged only.
    #[serde(default = "default_user_type")]
    pub user_type: String,
}

/// Body of `POST /generate-roadmap`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRoadmapRequest {
    /// Caller's goal identifier, used for logging.
    pub goal_id: String,
    /// Goal title, echoed into each step description.
    pub goal_title: String,
    /// Goal description.
    pub goal_description: String,
    /// Duration class name; anything but an exact wire name gets the
    /// default step count.
    pub goal_type: String,
    /// Target date, passed through untouched.
    #[serde(default)]
    pub target_date: Option<String>,
    /// Subject wire name. Absent selects the generic template.
    #[serde(default)]
    #[validate(custom(function = "validate_subject"))]
    pub subject: Option<String>,
}

impl GenerateRoadmapRequest {
    /// Convert into generator input.
    pub fn to_goal(&self) -> RoadmapGoal {
        RoadmapGoal {
            title: self.goal_title.clone(),
            description: self.goal_description.clone(),
            goal_type: GoalType::parse(&self.goal_type),
            subject: self
                .subject
                .as_deref()
                .and_then(Subject::parse)
                .unwrap_or_default(),
            target_date: self.target_date.clone(),
        }
    }
}
