//! Keyword Extractor — stopword-filtered frequency ranking and CV/JD vocabulary diffing.
//!
//! No ML dependency. Output order is deterministic: descending frequency, ties broken by
//! the position at which a token was first seen.

use std::collections::{HashMap, HashSet};

use crate::text::normalizer::NormalizerProfile;

/// Token → count, with first-seen order kept so ranking is reproducible.
#[derive(Debug, Clone, Default)]
pub struct KeywordFrequencyTable {
    counts: HashMap<String, usize>,
    first_seen: Vec<String>,
}

impl KeywordFrequencyTable {
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut table = Self::default();
        for token in tokens {
            match table.counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    table.counts.insert(token.clone(), 1);
                    table.first_seen.push(token.clone());
                }
            }
        }
        table
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Distinct tokens, most frequent first. `sort_by` is stable, so equal counts keep
    /// first-seen order.
    pub fn ranked(&self) -> Vec<String> {
        let mut ranked = self.first_seen.clone();
        ranked.sort_by(|a, b| self.count(b).cmp(&self.count(a)));
        ranked
    }
}

/// Ranks the distinct keywords of `text` by frequency (ranking profile).
pub fn rank_keywords(text: &str) -> Vec<String> {
    let tokens = NormalizerProfile::Ranking.normalizer().normalize(text);
    KeywordFrequencyTable::from_tokens(&tokens).ranked()
}

/// Keywords of the target tokens, most frequent first, that never appear among the
/// source tokens. Callers normalize both sides with the diffing profile. Truncated to `cap`.
pub fn missing_from_tokens(
    source_tokens: &[String],
    target_tokens: &[String],
    cap: usize,
) -> Vec<String> {
    let source_vocabulary: HashSet<&str> = source_tokens.iter().map(String::as_str).collect();

    KeywordFrequencyTable::from_tokens(target_tokens)
        .ranked()
        .into_iter()
        .filter(|keyword| !source_vocabulary.contains(keyword.as_str()))
        .take(cap)
        .collect()
}

/// Ranked keywords of `target` that occur as substrings of the lowercased `source` text.
pub fn matched_keywords(source: &str, target: &str) -> Vec<String> {
    let source_lower = source.to_lowercase();
    rank_keywords(target)
        .into_iter()
        .filter(|keyword| source_lower.contains(keyword.as_str()))
        .collect()
}

/// Positional access into a ranked keyword list with a fallback for short lists.
pub fn keyword_slot<'a>(keywords: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    keywords.get(index).map(String::as_str).unwrap_or(fallback)
}
