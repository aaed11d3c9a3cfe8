//! Relevance Ranker — orders CV fragments by semantic closeness to a target document.
//!
//! Embeds `[target] + fragments` in one provider call, scores each fragment against the
//! target with cosine similarity and sorts descending. Ties keep input order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Document, Fragment};
use crate::embedding::EmbeddingService;
use crate::matching::similarity::{cosine_similarity, to_percentage};
use crate::matching::MatchError;

/// A fragment paired with its similarity to the ranking target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredFragment {
    pub fragment: Fragment,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
    pub percentage: u8,
}

/// Ranks `fragments` against `target`, most relevant first.
///
/// An empty fragment list returns immediately without touching the provider.
pub async fn rank(
    embeddings: &EmbeddingService,
    target: &Document,
    fragments: &[Fragment],
) -> Result<Vec<ScoredFragment>, MatchError> {
    if fragments.is_empty() {
        return Ok(Vec::new());
    }

    let batch: Vec<String> = std::iter::once(target.text().to_string())
        .chain(fragments.iter().map(|f| f.text.clone()))
        .collect();

    let vectors = embeddings.embed(&batch).await?;
    let (target_vector, fragment_vectors) = vectors
        .split_first()
        .ok_or_else(|| MatchError::ProviderUnavailable("no target vector returned".to_string()))?;

    let mut scored: Vec<ScoredFragment> = fragments
        .iter()
        .zip(fragment_vectors)
        .map(|(fragment, vector)| {
            let score = cosine_similarity(vector.as_slice(), target_vector.as_slice());
            ScoredFragment {
                fragment: fragment.clone(),
                score,
                percentage: to_percentage(score),
            }
        })
        .collect();

    // Stable: equal scores keep input order.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!("Ranked {} fragments against document {}", scored.len(), target.id());
    Ok(scored)
}

/// Keeps the `k` best fragments of an already ranked list.
pub fn top_k(mut ranked: Vec<ScoredFragment>, k: usize) -> Vec<ScoredFragment> {
    ranked.truncate(k);
    ranked
}

/// Mean cosine score of a ranked selection; `0.0` when empty.
pub fn mean_score(selection: &[ScoredFragment]) -> f32 {
    if selection.is_empty() {
        return 0.0;
    }
    selection.iter().map(|s| s.score).sum::<f32>() / selection.len() as f32
}
