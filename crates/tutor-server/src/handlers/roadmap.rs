//! `POST /generate-roadmap`.

use super::run_core;
use crate::{
    error::ApiResult, request::GenerateRoadmapRequest, request::ValidatedJson,
    response::RoadmapResponse, state::AppState,
};
use axum::{extract::State, Json};
use tracing::{info, warn};

/// Expand one goal into a study roadmap.
pub async fn generate_roadmap(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<GenerateRoadmapRequest>,
) -> ApiResult<Json<RoadmapResponse>> {
    let goal = req.to_goal();
    if goal.goal_type.is_none() {
        warn!(goal_id = %req.goal_id, goal_type = %req.goal_type, "Unknown goal type, using default step count");
    }

    let roadmap = run_core("generating roadmap", || state.roadmap.generate(&goal))?;

    info!(
        goal_id = %req.goal_id,
        subject = %goal.subject,
        steps = roadmap.len(),
        "Generated roadmap"
    );

    Ok(Json(RoadmapResponse::new(roadmap)))
}
