use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{parser, ExtractedSkills};
use crate::market::{RankedSkill, RoleComparison};
use crate::roadmap::{assembler, Roadmap};
use crate::state::AppState;

fn default_hours_per_week() -> u32 {
    15
}

#[derive(Deserialize)]
pub struct RoadmapRequest {
    pub target_skills: Vec<String>,
    pub current_skills: Vec<String>,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: u32,
}

/// POST /api/v1/roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = assembler::generate(
        &state.store,
        &req.target_skills,
        &req.current_skills,
        req.hours_per_week,
    )?;
    Ok(Json(roadmap))
}

#[derive(Deserialize)]
pub struct AnalyzeQuery {
    pub target_role: Option<String>,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: u32,
}

#[derive(Serialize)]
pub struct MarketAnalysis {
    pub ranked_skills: Vec<RankedSkill>,
    pub top_skills: Vec<RankedSkill>,
}

#[derive(Serialize)]
pub struct AnalyzeSummary {
    pub current_skill_count: usize,
    pub required_skill_count: usize,
    pub readiness_percentage: f64,
    pub skills_to_learn: usize,
    pub estimated_weeks: u32,
    pub estimated_hours: u32,
}

/// Full pipeline response: extraction, market ranking, role comparison,
/// and the roadmap closing the role gap.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub extracted_skills: ExtractedSkills,
    pub market_analysis: MarketAnalysis,
    pub role_comparison: RoleComparison,
    pub learning_roadmap: Option<Roadmap>,
    pub summary: AnalyzeSummary,
}

/// POST /api/v1/analyze?target_role=...&hours_per_week=...
///
/// The main combined endpoint: extract skills from the uploaded resume,
/// rank them, compare against the target role, and generate a roadmap for
/// the missing required skills.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let target_role = query.target_role.as_deref().unwrap_or("Data Scientist");

    let (content, filename) = read_upload(multipart).await?;
    let resume_text = parser::extract_text(&content, &filename)?;
    if resume_text.len() < 50 {
        return Err(AppError::UnprocessableEntity(
            "Could not extract sufficient text from resume".to_string(),
        ));
    }

    let extracted = state.extractor.extract(&resume_text);
    let user_skills = extracted.all_skills.clone();

    let ranked = state.market.rank_skills(&user_skills, Some(target_role));
    let top_skills: Vec<RankedSkill> = ranked.iter().take(5).cloned().collect();

    let comparison = state.market.compare_with_role(&user_skills, target_role)?;

    let roadmap = if comparison.missing_required_skills.is_empty() {
        None
    } else {
        Some(assembler::generate(
            &state.store,
            &comparison.missing_required_skills,
            &user_skills,
            query.hours_per_week,
        )?)
    };

    let summary = AnalyzeSummary {
        current_skill_count: user_skills.len(),
        required_skill_count: comparison.total_required,
        readiness_percentage: comparison.readiness_percentage,
        skills_to_learn: comparison.missing_required_skills.len(),
        estimated_weeks: roadmap.as_ref().map_or(0, |r| r.total_weeks),
        estimated_hours: roadmap.as_ref().map_or(0, |r| r.total_hours),
    };

    Ok(Json(AnalyzeResponse {
        extracted_skills: extracted,
        market_analysis: MarketAnalysis {
            ranked_skills: ranked,
            top_skills,
        },
        role_comparison: comparison,
        learning_roadmap: roadmap,
        summary,
    }))
}

/// Reads the first `file` field from a multipart upload.
pub async fn read_upload(mut multipart: Multipart) -> Result<(Vec<u8>, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::Validation("Missing filename".to_string()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            return Ok((bytes.to_vec(), filename));
        }
    }
    Err(AppError::Validation(
        "Multipart body must contain a 'file' field".to_string(),
    ))
}
