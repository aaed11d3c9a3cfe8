//! Axum route handlers for keyword ranking, ATS scans and tailored CVs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::errors::AppError;
use crate::matching::report::{build_report, MatchReport};
use crate::state::AppState;
use crate::tailoring::{tailor, TailoredCv};
use crate::text::keywords::rank_keywords;

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub cv_text: String,
    pub job_description: String,
    /// Overrides `MISSING_KEYWORD_CAP` for this request.
    pub keyword_cap: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub cv_text: String,
    pub job_description: String,
    /// Overrides `TOP_K_FRAGMENTS` for this request.
    pub top_k: Option<usize>,
}

/// POST /api/v1/keywords
///
/// Distinct keywords of `text`, most frequent first. Degenerate input yields an empty list.
pub async fn handle_keywords(Json(request): Json<KeywordsRequest>) -> Json<KeywordsResponse> {
    Json(KeywordsResponse {
        keywords: rank_keywords(&request.text),
    })
}

/// POST /api/v1/ats/scan
pub async fn handle_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let cap = request
        .keyword_cap
        .unwrap_or(state.config.missing_keyword_cap);
    if cap == 0 {
        return Err(AppError::Validation(
            "keyword_cap must be at least 1".to_string(),
        ));
    }

    let cv = Document::new(request.cv_text);
    let job_description = Document::new(request.job_description);
    let report = build_report(&state.embeddings, &cv, &job_description, cap).await?;
    Ok(Json(report))
}

/// POST /api/v1/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailoredCv>, AppError> {
    let k = request.top_k.unwrap_or(state.config.top_k_fragments);
    if k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }

    let cv = Document::new(request.cv_text);
    let job_description = Document::new(request.job_description);
    let tailored = tailor(&state.embeddings, &cv, &job_description, k).await?;
    Ok(Json(tailored))
}
