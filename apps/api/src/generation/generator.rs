//! CV Generator — asks the LLM to rewrite a CV for a target job description and
//! interprets the JSON it returns.
//!
//! The response is parsed once: a single markdown fence strip, then strict JSON.
//! Missing fields default to empty; wrong shapes fail with the raw content attached.
//! Malformed content is never retried.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{cv_rewrite_prompt, CV_REWRITE_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedCv {
    pub full_name: String,
    pub current_job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub date: String,
}

/// The generative collaborator returned content that is not a CV object.
#[derive(Debug, Error)]
#[error("generated CV could not be parsed: {reason}")]
pub struct ParseFailure {
    /// Content exactly as received, before fence stripping.
    pub raw_content: String,
    pub reason: String,
}

impl ParseFailure {
    fn new(raw: &str, reason: impl Into<String>) -> Self {
        Self {
            raw_content: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Interprets raw LLM output as a [`ParsedCv`].
pub fn parse_generated_cv(raw: &str) -> Result<ParsedCv, ParseFailure> {
    let stripped = strip_json_fences(raw);

    let value: serde_json::Value = serde_json::from_str(stripped)
        .map_err(|e| ParseFailure::new(raw, format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(ParseFailure::new(raw, "top-level value must be a JSON object"));
    }

    serde_json::from_value(value)
        .map_err(|e| ParseFailure::new(raw, format!("schema mismatch: {e}")))
}

/// Rewrites `cv_text` for `jd_text`.
pub async fn generate_cv(
    llm: &LlmClient,
    cv_text: &str,
    jd_text: &str,
) -> Result<ParsedCv, AppError> {
    let system = CV_REWRITE_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_INSTRUCTION);
    let prompt = cv_rewrite_prompt(cv_text, jd_text);

    let raw = match llm.call_text(&prompt, &system).await {
        Ok(raw) => raw,
        Err(LlmError::EmptyContent) => {
            return Err(ParseFailure::new("", "LLM returned empty content").into())
        }
        Err(e) => return Err(AppError::ProviderUnavailable(format!("CV generation failed: {e}"))),
    };

    let parsed = parse_generated_cv(&raw).map_err(|e| {
        warn!("Discarding malformed CV generation output: {}", e.reason);
        e
    })?;

    info!(
        "Generated CV via {}: {} experience entries, {} skills",
        llm.model(),
        parsed.experience.len(),
        parsed.skills.len()
    );
    Ok(parsed)
}
