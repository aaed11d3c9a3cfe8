//! Axum route handler for file uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::document::Document;
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind, ExtractionError};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub kind: DocumentKind,
    pub text: String,
    /// Experience bullets the ranker would consider.
    pub fragment_count: usize,
}

/// POST /api/v1/extract
///
/// Accepts a multipart upload with a `file` part (PDF or DOCX) and returns its text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let kind = DocumentKind::detect(field.content_type(), field.file_name())
            .ok_or(ExtractionError::UnsupportedKind)?;
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        let text = extract_text(bytes, kind).await?;
        let fragment_count = Document::new(text.as_str()).fragments().len();

        info!(
            "Extracted {:?} '{}': {} chars, {} fragments",
            kind,
            file_name,
            text.len(),
            fragment_count
        );

        return Ok(Json(ExtractResponse {
            kind,
            text,
            fragment_count,
        }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}
