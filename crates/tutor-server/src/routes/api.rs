//! Goal and roadmap endpoints.

use crate::{handlers, state::AppState};
use axum::{routing::post, Router};

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/structure-goals", post(handlers::structure_goals))
        .route("/generate-roadmap", post(handlers::generate_roadmap))
}
