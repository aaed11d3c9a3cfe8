// Matching core: similarity scoring, fragment ranking and the ATS match report.
// The embedding service is the only suspension point; everything else is pure.

pub mod handlers;
pub mod ranker;
pub mod report;
pub mod similarity;

use thiserror::Error;

use crate::document::Document;
use crate::embedding::EmbeddingError;

/// Failures of the matching core. Degenerate input never lands here; it yields
/// neutral or empty results instead.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Required input missing, or the embedding model is not initialized yet.
    /// Raised before any computation starts.
    #[error("{0}")]
    Precondition(String),

    /// The embedding collaborator failed to initialize, timed out or misbehaved.
    #[error("{0}")]
    ProviderUnavailable(String),
}

impl From<EmbeddingError> for MatchError {
    fn from(e: EmbeddingError) -> Self {
        match e {
            EmbeddingError::NotReady => MatchError::Precondition(e.to_string()),
            other => MatchError::ProviderUnavailable(other.to_string()),
        }
    }
}

/// Rejects a blank required document before any work is done.
pub(crate) fn require_text(document: &Document, what: &str) -> Result<(), MatchError> {
    if document.is_blank() {
        return Err(MatchError::Precondition(format!("{what} is required")));
    }
    Ok(())
}
