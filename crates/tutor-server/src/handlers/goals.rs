//! `POST /structure-goals`.

use super::run_core;
use crate::{
    error::ApiResult, request::StructureGoalsRequest, request::ValidatedJson,
    response::StructureGoalsResponse, state::AppState,
};
use axum::{extract::State, Json};
use tracing::info;

/// Turn free-text goals into structured goal records.
pub async fn structure_goals(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<StructureGoalsRequest>,
) -> ApiResult<Json<StructureGoalsResponse>> {
    let goals = run_core("structuring goals", || state.classifier.classify(&req.user_input))?;

    info!(
        user_type = %req.user_type,
        input_chars = req.user_input.chars().count(),
        goals = goals.len(),
        "Structured goals"
    );

    Ok(Json(StructureGoalsResponse::new(goals)))
}
