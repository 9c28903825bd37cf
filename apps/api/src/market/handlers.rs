use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::market::{RankedSkill, RoleComparison};
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn handle_roles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.market.all_roles())
}

#[derive(Deserialize)]
pub struct RankRequest {
    pub skills: Vec<String>,
    pub target_role: Option<String>,
}

#[derive(Serialize)]
pub struct RankedSkillsResponse {
    pub ranked_skills: Vec<RankedSkill>,
    pub count: usize,
}

/// POST /api/v1/skills/rank
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Json<RankedSkillsResponse> {
    let ranked = state
        .market
        .rank_skills(&req.skills, req.target_role.as_deref());
    Json(RankedSkillsResponse {
        count: ranked.len(),
        ranked_skills: ranked,
    })
}

#[derive(Deserialize)]
pub struct RoleComparisonRequest {
    pub skills: Vec<String>,
    pub target_role: String,
}

/// POST /api/v1/roles/compare
pub async fn handle_compare_role(
    State(state): State<AppState>,
    Json(req): Json<RoleComparisonRequest>,
) -> Result<Json<RoleComparison>, AppError> {
    let comparison = state
        .market
        .compare_with_role(&req.skills, &req.target_role)?;
    Ok(Json(comparison))
}
