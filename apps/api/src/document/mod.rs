//! Documents and fragments — the immutable text values every analysis operates on.
//!
//! A `Document` is created once from extracted or pasted text and replaced wholesale on
//! re-upload. Normalized tokens are derived lazily and cached per normalizer profile.

pub mod contact;
pub mod draft;
pub mod handlers;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text::NormalizerProfile;

/// Lines at or below this many characters are not treated as rankable bullets.
const MIN_FRAGMENT_CHARS: usize = 20;

#[derive(Debug)]
pub struct Document {
    id: Uuid,
    text: String,
    ranking_tokens: OnceLock<Vec<String>>,
    diffing_tokens: OnceLock<Vec<String>>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            ranking_tokens: OnceLock::new(),
            diffing_tokens: OnceLock::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Normalized tokens for `profile`, computed on first access.
    pub fn tokens(&self, profile: NormalizerProfile) -> &[String] {
        let cell = match profile {
            NormalizerProfile::Ranking => &self.ranking_tokens,
            NormalizerProfile::Diffing => &self.diffing_tokens,
        };
        cell.get_or_init(|| profile.normalizer().normalize(&self.text))
    }

    /// Segments the document into candidate CV bullets.
    ///
    /// Keeps trimmed lines longer than 20 characters that carry no `@` (contact lines)
    /// and do not mention "experience" (section headings).
    pub fn fragments(&self) -> Vec<Fragment> {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > MIN_FRAGMENT_CHARS)
            .filter(|line| !line.contains('@'))
            .filter(|line| !line.to_lowercase().contains("experience"))
            .enumerate()
            .map(|(position, line)| Fragment::new(line, position, self.id))
            .collect()
    }
}

/// A single rankable unit of CV content. Refers back to its document by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Index among the fragments segmented from the same document.
    pub position: usize,
    pub source_id: Uuid,
}

impl Fragment {
    pub fn new(text: impl Into<String>, position: usize, source_id: Uuid) -> Self {
        Self {
            text: text.into(),
            position,
            source_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CV: &str = "Jane Doe\n\
        jane.doe@example.com\n\
        Professional Experience\n\
        Built a Rust ingestion pipeline handling 2M events/day\n\
        short line\n\
        \n\
           Migrated CI from Jenkins to GitHub Actions, cutting build time 40%   \n\
        Five years of experience leading backend teams";

    #[test]
    fn test_fragments_filter_short_contact_and_heading_lines() {
        let doc = Document::new(CV);
        let fragments = doc.fragments();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Built a Rust ingestion pipeline handling 2M events/day",
                "Migrated CI from Jenkins to GitHub Actions, cutting build time 40%",
            ]
        );
    }

    #[test]
    fn test_fragments_carry_position_and_source() {
        let doc = Document::new(CV);
        let fragments = doc.fragments();
        assert_eq!(fragments[0].position, 0);
        assert_eq!(fragments[1].position, 1);
        assert!(fragments.iter().all(|f| f.source_id == doc.id()));
    }

    #[test]
    fn test_tokens_are_cached_per_profile() {
        let doc = Document::new("AWS and Kubernetes");
        assert_eq!(doc.tokens(NormalizerProfile::Ranking), ["kubernetes"]);
        assert_eq!(doc.tokens(NormalizerProfile::Diffing), ["aws", "kubernetes"]);
        let first = doc.tokens(NormalizerProfile::Ranking).as_ptr();
        let second = doc.tokens(NormalizerProfile::Ranking).as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_document() {
        assert!(Document::new("  \n ").is_blank());
        assert!(Document::new("").fragments().is_empty());
    }
}
