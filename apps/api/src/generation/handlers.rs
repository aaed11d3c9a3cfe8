//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_cv, ParsedCv};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub cv_text: String,
    pub job_description: String,
}

/// POST /api/v1/generate
///
/// Rewrites the CV for the job description with the configured LLM.
/// Fails with a precondition error when no LLM API key is configured.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ParsedCv>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Precondition("CV text is required".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Precondition(
            "Job description is required".to_string(),
        ));
    }

    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::Precondition("CV generation requires LLM_API_KEY to be configured".to_string())
    })?;

    let parsed = generate_cv(llm, &request.cv_text, &request.job_description).await?;
    Ok(Json(parsed))
}
