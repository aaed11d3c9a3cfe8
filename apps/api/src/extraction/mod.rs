//! Text extraction from uploaded CV files.
//!
//! PDF goes through `pdf-extract`; DOCX is walked Paragraph → Run → Text with `docx-rs`.
//! Both parsers are CPU-bound and run on the blocking pool.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, warn};

pub mod handlers;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime == DOCX_MIME {
            Some(DocumentKind::Docx)
        } else if mime == PDF_MIME || mime.contains("pdf") {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// MIME type wins; the file name is the fallback for generic uploads
    /// such as `application/octet-stream`.
    pub fn detect(mime: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| file_name.and_then(Self::from_file_name))
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type (expected PDF or DOCX)")]
    UnsupportedKind,

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),

    #[error("extraction worker failed: {0}")]
    Worker(JoinError),
}

/// Extracts plain text from `bytes` of the given kind.
pub async fn extract_text(bytes: Bytes, kind: DocumentKind) -> Result<String, ExtractionError> {
    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf(&bytes),
        DocumentKind::Docx => extract_docx(&bytes),
    })
    .await
    .map_err(|e| worker_error(kind, e))??;

    debug!(
        "Extracted {} chars from {:?} ({} bytes)",
        text.len(),
        kind,
        size
    );
    Ok(text)
}

/// Parsers panic on some malformed files; that is a bad upload, not a broken worker.
fn worker_error(kind: DocumentKind, e: JoinError) -> ExtractionError {
    if !e.is_panic() {
        return ExtractionError::Worker(e);
    }
    warn!("{:?} parser panicked on upload", kind);
    let reason = "document structure could not be parsed".to_string();
    match kind {
        DocumentKind::Pdf => ExtractionError::Pdf(reason),
        DocumentKind::Docx => ExtractionError::Docx(reason),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::DocumentChild;

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Runs in one paragraph belong to the same sentence and are joined without a separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    use docx_rs::{ParagraphChild, RunChild};

    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
