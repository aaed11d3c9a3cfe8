//! Match Report — ATS-style score, rating tier, missing keywords and suggestions for a
//! CV measured against a job description.
//!
//! Algorithm:
//! 1. Embed `[cv, jd]` in one call and take their cosine similarity as a 0–100 percentage
//! 2. Diff vocabularies: JD keywords (by frequency) absent from the CV, capped
//! 3. Select a tier: > 75 great, 51–75 decent, ≤ 50 low
//! 4. Fill the fixed suggestion templates with the top 3 missing keywords

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::Document;
use crate::embedding::EmbeddingService;
use crate::matching::similarity::{cosine_similarity, to_percentage};
use crate::matching::{require_text, MatchError};
use crate::text::keywords::{keyword_slot, missing_from_tokens};
use crate::text::NormalizerProfile;

pub const DEFAULT_MISSING_KEYWORD_CAP: usize = 10;

/// How many missing keywords the first suggestion names.
const SUGGESTED_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    Great,
    Decent,
    Low,
}

impl RatingTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s > 75 => RatingTier::Great,
            s if s > 50 => RatingTier::Decent,
            _ => RatingTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingTier::Great => "Great match",
            RatingTier::Decent => "Decent match",
            RatingTier::Low => "Low match",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RatingTier::Great => "Great match! Your CV is ATS ready.",
            RatingTier::Decent => "Decent match, but missing key terms.",
            RatingTier::Low => "Low match. Heavy optimization needed.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// 0 – 100
    pub score: u8,
    /// Raw cosine similarity between the two documents.
    pub similarity: f32,
    pub tier: RatingTier,
    pub rating: String,
    pub message: String,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Builds the report for `cv` against `job_description`.
pub async fn build_report(
    embeddings: &EmbeddingService,
    cv: &Document,
    job_description: &Document,
    keyword_cap: usize,
) -> Result<MatchReport, MatchError> {
    require_text(cv, "CV text")?;
    require_text(job_description, "Job description")?;

    let batch = vec![cv.text().to_string(), job_description.text().to_string()];
    let vectors = embeddings.embed(&batch).await?;
    let similarity = match vectors.as_slice() {
        [cv_vector, jd_vector] => cosine_similarity(cv_vector.as_slice(), jd_vector.as_slice()),
        _ => {
            return Err(MatchError::ProviderUnavailable(
                "expected two document vectors".to_string(),
            ))
        }
    };

    let missing_keywords = missing_from_tokens(
        cv.tokens(NormalizerProfile::Diffing),
        job_description.tokens(NormalizerProfile::Diffing),
        usize::MAX,
    );

    let report = assemble_report(similarity, missing_keywords, keyword_cap);
    info!(
        "Match report: {}% ({}), {} missing keywords",
        report.score,
        report.rating,
        report.missing_keywords.len()
    );
    Ok(report)
}

/// Pure tail of [`build_report`], once similarity and the full keyword diff are known.
///
/// Suggestions are chosen from the full diff; only the reported list is truncated to
/// `keyword_cap`.
pub fn assemble_report(
    similarity: f32,
    mut missing_keywords: Vec<String>,
    keyword_cap: usize,
) -> MatchReport {
    let score = to_percentage(similarity);
    let tier = RatingTier::from_score(score);
    let suggestions = build_suggestions(&missing_keywords);
    missing_keywords.truncate(keyword_cap);

    MatchReport {
        score,
        similarity,
        tier,
        rating: tier.label().to_string(),
        message: tier.message().to_string(),
        missing_keywords,
        suggestions,
    }
}

fn build_suggestions(missing_keywords: &[String]) -> Vec<String> {
    let first = if missing_keywords.is_empty() {
        "Your CV already covers the most frequent job description keywords.".to_string()
    } else {
        let top: Vec<&str> = (0..SUGGESTED_KEYWORDS.min(missing_keywords.len()))
            .map(|i| keyword_slot(missing_keywords, i, ""))
            .collect();
        format!(
            "Include these missing keywords in your Experience or Skills section: {}",
            top.join(", ")
        )
    };

    vec![
        first,
        "Ensure your job titles match the standard industry terms found in the description."
            .to_string(),
        "Use bullet points for readability (ATS engines prefer standard formatting).".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::embedding::testing::{service_with, FixedProvider, LetterProvider};
    use crate::embedding::EmbeddingService;

    const CV: &str = "Experienced Python developer with AWS and Docker skills";
    const JD: &str = "Looking for a Python engineer with strong AWS experience";

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RatingTier::from_score(76), RatingTier::Great);
        assert_eq!(RatingTier::from_score(75), RatingTier::Decent);
        assert_eq!(RatingTier::from_score(51), RatingTier::Decent);
        assert_eq!(RatingTier::from_score(50), RatingTier::Low);
        assert_eq!(RatingTier::from_score(0), RatingTier::Low);
        assert_eq!(RatingTier::from_score(100), RatingTier::Great);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(RatingTier::from_score(75).label(), "Decent match");
        assert_eq!(RatingTier::from_score(76).label(), "Great match");
        assert_eq!(RatingTier::from_score(50).label(), "Low match");
    }

    #[test]
    fn test_suggestions_name_top_three_missing() {
        let missing: Vec<String> = ["kafka", "helm", "terraform", "grpc"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = assemble_report(0.6, missing, 10);
        assert_eq!(report.suggestions.len(), 3);
        assert!(report.suggestions[0].ends_with(": kafka, helm, terraform"));
    }

    #[test]
    fn test_suggestions_tolerate_fewer_than_three_keywords() {
        let report = assemble_report(0.6, vec!["kafka".to_string()], 10);
        assert!(report.suggestions[0].ends_with(": kafka"));

        let report = assemble_report(0.9, vec![], 10);
        assert!(report.suggestions[0].contains("already covers"));
    }

    #[test]
    fn test_zero_cap_still_suggests_uncovered_keywords() {
        let missing: Vec<String> = ["kubernetes", "kafka"].iter().map(|s| s.to_string()).collect();
        let report = assemble_report(0.1, missing, 0);
        assert!(report.missing_keywords.is_empty());
        assert!(report.suggestions[0].ends_with(": kubernetes, kafka"));
    }

    #[tokio::test]
    async fn test_unrelated_cv_is_never_told_it_covers_keywords() {
        let service = service_with(Arc::new(LetterProvider::new()));
        let report = build_report(
            &service,
            &Document::new("Gardener who grows tomatoes"),
            &Document::new("Kubernetes Kafka Terraform engineer"),
            0,
        )
        .await
        .unwrap();
        assert!(report.missing_keywords.is_empty());
        assert!(!report.suggestions[0].contains("already covers"));
        assert!(report.suggestions[0].contains("kubernetes"));
    }

    #[tokio::test]
    async fn test_cap_truncates_reported_keywords() {
        let service = service_with(Arc::new(LetterProvider::new()));
        let report = build_report(&service, &Document::new(CV), &Document::new(JD), 1)
            .await
            .unwrap();
        assert_eq!(report.missing_keywords, vec!["looking"]);
        assert!(report.suggestions[0].ends_with(": looking, engineer, strong"));
    }

    #[test]
    fn test_negative_similarity_reports_zero() {
        let report = assemble_report(-0.3, vec![], 10);
        assert_eq!(report.score, 0);
        assert_eq!(report.tier, RatingTier::Low);
    }

    #[tokio::test]
    async fn test_build_report_scenario() {
        let provider = Arc::new(LetterProvider::new());
        let service = service_with(provider.clone());
        let report = build_report(&service, &Document::new(CV), &Document::new(JD), 10)
            .await
            .unwrap();

        assert!(!report.missing_keywords.contains(&"python".to_string()));
        assert!(!report.missing_keywords.contains(&"aws".to_string()));
        assert!(report.missing_keywords.contains(&"engineer".to_string()));
        assert!(report.score <= 100);
        assert_eq!(report.rating, report.tier.label());
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.batch_sizes(), vec![2]);
    }

    #[tokio::test]
    async fn test_build_report_uses_document_similarity() {
        let service = service_with(Arc::new(FixedProvider(vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
        ])));
        let report = build_report(&service, &Document::new(CV), &Document::new(JD), 2)
            .await
            .unwrap();
        assert_eq!(report.score, 100);
        assert_eq!(report.tier, RatingTier::Great);
        assert_eq!(report.missing_keywords, vec!["looking", "engineer"]);
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_embedding() {
        let provider = Arc::new(LetterProvider::new());
        let service = service_with(provider.clone());

        let err = build_report(&service, &Document::new("  "), &Document::new(JD), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Precondition(_)));

        let err = build_report(&service, &Document::new(CV), &Document::new(""), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Precondition(_)));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_model_not_ready_is_precondition() {
        let service = EmbeddingService::new(std::time::Duration::from_secs(1));
        let err = build_report(&service, &Document::new(CV), &Document::new(JD), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Precondition(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_timeout_is_unavailable() {
        let service = EmbeddingService::ready(
            Arc::new(crate::embedding::testing::StalledProvider),
            std::time::Duration::from_secs(2),
        );
        let err = build_report(&service, &Document::new(CV), &Document::new(JD), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::ProviderUnavailable(_)));
    }
}
