//! Tailored CV assembly — reorders a CV around a job description without an LLM.
//!
//! Flow: segment CV into fragments → rank against the JD → keep top-K →
//! keywords shared by JD and CV → templated summary and skills line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::contact::{extract_contact, ContactDetails};
use crate::document::Document;
use crate::embedding::EmbeddingService;
use crate::matching::ranker::{mean_score, rank, top_k, ScoredFragment};
use crate::matching::similarity::to_percentage;
use crate::matching::{require_text, MatchError};
use crate::text::keywords::{keyword_slot, matched_keywords};

pub const DEFAULT_TOP_K: usize = 10;
const MAX_SKILLS: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredCv {
    pub contact: ContactDetails,
    pub summary: String,
    pub skills: Vec<String>,
    pub relevant_experience: Vec<ScoredFragment>,
    /// Mean relevance of the selected bullets, 0 – 100.
    pub match_score: u8,
    pub generated_at: DateTime<Utc>,
}

pub async fn tailor(
    embeddings: &EmbeddingService,
    cv: &Document,
    job_description: &Document,
    k: usize,
) -> Result<TailoredCv, MatchError> {
    require_text(cv, "CV text")?;
    require_text(job_description, "Job description")?;

    let fragments = cv.fragments();
    if fragments.is_empty() {
        return Err(MatchError::Precondition(
            "No experience bullets found in the CV text".to_string(),
        ));
    }

    let ranked = rank(embeddings, job_description, &fragments).await?;
    let relevant_experience = top_k(ranked, k);
    let match_score = to_percentage(mean_score(&relevant_experience));

    let keywords = matched_keywords(cv.text(), job_description.text());
    let summary = build_summary(&keywords);
    let skills = keywords.iter().take(MAX_SKILLS).cloned().collect();

    info!(
        "Tailored CV: kept {}/{} bullets, {} matched keywords, score {}%",
        relevant_experience.len(),
        fragments.len(),
        keywords.len(),
        match_score
    );

    Ok(TailoredCv {
        contact: extract_contact(cv.text()),
        summary,
        skills,
        relevant_experience,
        match_score,
        generated_at: Utc::now(),
    })
}

/// Fills the summary template from the three strongest shared keywords.
pub fn build_summary(keywords: &[String]) -> String {
    format!(
        "Professional with strong expertise in {} and {}. Proven track record of delivering \
         results in challenging environments. Excited to apply skills in {} to drive success.",
        keyword_slot(keywords, 0, "Software").to_uppercase(),
        keyword_slot(keywords, 1, "industry tools"),
        keyword_slot(keywords, 2, "key areas"),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::embedding::testing::{service_with, LetterProvider};

    const CV: &str = "Jane Doe\n\
        jane@example.com\n\
        Work Experience\n\
        Designed Kubernetes operators for stateful Postgres clusters\n\
        Organised the office charity bake sale every spring\n\
        Built Kafka streaming pipelines in Rust processing 1M msgs/sec\n";

    const JD: &str = "Platform engineer: Kubernetes, Kafka, Rust. Kubernetes operators a plus.";

    #[test]
    fn test_summary_with_three_keywords() {
        let keywords: Vec<String> = ["rust", "kafka", "kubernetes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let summary = build_summary(&keywords);
        assert!(summary.starts_with("Professional with strong expertise in RUST and kafka."));
        assert!(summary.contains("apply skills in kubernetes to drive success"));
    }

    #[test]
    fn test_summary_falls_back_without_keywords() {
        let summary = build_summary(&[]);
        assert!(summary.contains("expertise in SOFTWARE and industry tools"));
        assert!(summary.contains("skills in key areas"));
    }

    #[tokio::test]
    async fn test_tailor_selects_and_ranks_bullets() {
        let provider = Arc::new(LetterProvider::new());
        let service = service_with(provider.clone());
        let tailored = tailor(&service, &Document::new(CV), &Document::new(JD), 2)
            .await
            .unwrap();

        assert_eq!(tailored.relevant_experience.len(), 2);
        assert!(tailored
            .relevant_experience
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
        assert_eq!(tailored.contact.email.as_deref(), Some("jane@example.com"));
        assert!(tailored.skills.contains(&"kubernetes".to_string()));
        assert!(tailored.skills.contains(&"kafka".to_string()));
        assert!(tailored.match_score <= 100);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_tailor_without_bullets_is_precondition() {
        let provider = Arc::new(LetterProvider::new());
        let service = service_with(provider.clone());
        let err = tailor(&service, &Document::new("Jane\nshort"), &Document::new(JD), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Precondition(_)));
        assert_eq!(provider.calls(), 0);
    }
}
