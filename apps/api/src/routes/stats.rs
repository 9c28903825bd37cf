use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/v1/stats
/// Dataset sizes and precomputed market insights.
pub async fn stats_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "skill_graph_nodes": state.store.skill_count(),
        "learning_resources": state.store.resource_count(),
        "skills_tracked": state.market.tracked_skill_count(),
        "job_roles_available": state.market.role_count(),
        "extractable_skills": state.extractor.skill_count(),
        "market_insights": state.market.insights(),
        "api_version": env!("CARGO_PKG_VERSION"),
        "features": [
            "Resume skill extraction",
            "Market demand analysis",
            "Role comparison",
            "Learning roadmap generation",
            "Prerequisite resolution",
            "Resource recommendations"
        ]
    }))
}
