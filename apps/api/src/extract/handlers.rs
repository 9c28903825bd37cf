use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::parser;
use crate::extract::ExtractedSkills;
use crate::roadmap::handlers::read_upload;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SkillsResponse {
    #[serde(flatten)]
    pub skills: ExtractedSkills,
    pub resume_text_preview: String,
}

/// POST /api/v1/skills/extract
/// Extracts skills from an uploaded resume (PDF or TXT).
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkillsResponse>, AppError> {
    let (content, filename) = read_upload(multipart).await?;

    info!("Parsing resume: {filename}");
    let resume_text = parser::extract_text(&content, &filename)?;
    if resume_text.len() < 50 {
        return Err(AppError::UnprocessableEntity(
            "Could not extract sufficient text from resume".to_string(),
        ));
    }

    let skills = state.extractor.extract(&resume_text);
    let preview: String = resume_text.chars().take(200).collect();

    Ok(Json(SkillsResponse {
        skills,
        resume_text_preview: format!("{preview}..."),
    }))
}

#[derive(Deserialize)]
pub struct ExtractTextRequest {
    pub text: String,
}

/// POST /api/v1/skills/extract-text
/// Extracts skills from plain text, no file upload needed.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(req): Json<ExtractTextRequest>,
) -> Result<Json<ExtractedSkills>, AppError> {
    Ok(Json(state.extractor.extract(&req.text)))
}
