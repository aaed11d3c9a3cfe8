//! Text Normalizer — lowercases, strips punctuation, splits, and drops short tokens
//! and stopwords.
//!
//! Two fixed profiles exist because the two keyword call sites filter differently:
//! ranking keeps tokens longer than 3 characters, diffing keeps tokens longer than 2,
//! and each carries its own stopword list.

/// Stopwords dropped when ranking keywords by importance.
pub const RANKING_STOPWORDS: &[&str] = &[
    "the", "and", "to", "of", "a", "in", "for", "with", "on", "is", "as", "an", "at", "by", "be",
    "are", "that", "or", "it", "from",
];

/// Stopwords dropped when diffing CV vocabulary against a job description.
pub const DIFFING_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is", "are",
    "was", "were", "be", "been", "by", "as", "it", "that", "this", "from",
];

/// Which filter configuration to normalize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerProfile {
    /// Keyword ranking: tokens longer than 3 characters.
    Ranking,
    /// Missing-keyword diffing: tokens longer than 2 characters.
    Diffing,
}

impl NormalizerProfile {
    pub fn normalizer(self) -> TextNormalizer {
        match self {
            NormalizerProfile::Ranking => TextNormalizer::new(3, RANKING_STOPWORDS),
            NormalizerProfile::Diffing => TextNormalizer::new(2, DIFFING_STOPWORDS),
        }
    }
}

/// Pure tokenizer. Tokens whose character count is `<= min_len` are dropped.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    min_len: usize,
    stopwords: &'static [&'static str],
}

impl TextNormalizer {
    pub fn new(min_len: usize, stopwords: &'static [&'static str]) -> Self {
        Self { min_len, stopwords }
    }

    /// Splits `text` into cleaned tokens, preserving their order of appearance.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| token.chars().count() > self.min_len)
            .filter(|token| !self.stopwords.contains(token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokens = NormalizerProfile::Diffing
            .normalizer()
            .normalize("Rust, Tokio & Axum! (async)");
        assert_eq!(tokens, vec!["rust", "tokio", "axum", "async"]);
    }

    #[test]
    fn test_underscore_is_kept_as_word_character() {
        let tokens = NormalizerProfile::Diffing
            .normalizer()
            .normalize("snake_case identifiers");
        assert_eq!(tokens, vec!["snake_case", "identifiers"]);
    }

    #[test]
    fn test_ranking_profile_drops_three_letter_tokens() {
        let tokens = NormalizerProfile::Ranking
            .normalizer()
            .normalize("AWS and SQL with Python");
        assert_eq!(tokens, vec!["python"]);
    }

    #[test]
    fn test_diffing_profile_keeps_three_letter_tokens() {
        let tokens = NormalizerProfile::Diffing
            .normalizer()
            .normalize("AWS and SQL with Python");
        assert_eq!(tokens, vec!["aws", "sql", "python"]);
    }

    #[test]
    fn test_profiles_use_distinct_stopwords() {
        // "this" and "were" are stopwords only for diffing; "been" as well.
        let text = "this were been";
        assert!(NormalizerProfile::Diffing.normalizer().normalize(text).is_empty());
        assert_eq!(
            NormalizerProfile::Ranking.normalizer().normalize(text),
            vec!["this", "were", "been"]
        );
    }

    #[test]
    fn test_stopword_lists_are_fixed() {
        assert_eq!(RANKING_STOPWORDS.len(), 20);
        assert_eq!(DIFFING_STOPWORDS.len(), 25);
    }

    #[test]
    fn test_empty_and_whitespace_text_yield_no_tokens() {
        let normalizer = NormalizerProfile::Ranking.normalizer();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("  \n\t ").is_empty());
        assert!(normalizer.normalize("!!! ... ???").is_empty());
    }

    #[test]
    fn test_custom_normalizer_threshold() {
        let normalizer = TextNormalizer::new(0, &[]);
        assert_eq!(normalizer.normalize("a bc"), vec!["a", "bc"]);
    }
}
