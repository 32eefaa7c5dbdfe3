//! Stop-word filtering.
//!
//! The filter removes tokens that appear in a configured set, keeping the
//! relative order of everything else. It does not deduplicate; turning tokens
//! into sets is the vectorizer's job.

use fxhash::FxHashSet;

use crate::config::StopWordSource;

/// Default English stop words, matching the list shipped with common
/// feature-extraction toolkits.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// A read-only stop-word set.
///
/// Words are lowercased on construction; tokens coming out of
/// [`tokenize`](crate::tokenize) are already lowercase, so membership is
/// effectively case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    words: FxHashSet<String>,
}

impl StopWordFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// A filter that keeps every token.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_source(source: &StopWordSource) -> Self {
        match source {
            StopWordSource::English => Self::english(),
            StopWordSource::None => Self::empty(),
            StopWordSource::Custom(words) => Self::new(words),
            StopWordSource::EnglishPlus(extra) => {
                Self::new(ENGLISH_STOP_WORDS.iter().copied().chain(extra.iter().map(String::as_str)))
            }
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Remove stop words, preserving the order of the remaining tokens.
    pub fn filter<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !self.contains(t))
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_preserves_order_and_duplicates() {
        let filter = StopWordFilter::new(["the", "on"]);
        let tokens = ["the", "cat", "sat", "on", "the", "cat"];
        assert_eq!(filter.filter(&tokens), vec!["cat", "sat", "cat"]);
    }

    #[test]
    fn words_are_lowercased_and_trimmed() {
        let filter = StopWordFilter::new([" The ", "A", ""]);
        assert!(filter.contains("the"));
        assert!(filter.contains("a"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = StopWordFilter::from_source(&StopWordSource::None);
        assert!(filter.is_empty());
        assert_eq!(filter.filter(&["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn english_list_covers_common_function_words() {
        let filter = StopWordFilter::english();
        for w in ["the", "a", "on", "was", "is", "and"] {
            assert!(filter.contains(w), "{w} should be a stop word");
        }
        assert!(!filter.contains("cat"));
    }

    #[test]
    fn english_plus_extends_default_list() {
        let filter =
            StopWordFilter::from_source(&StopWordSource::EnglishPlus(vec!["Lorem".into()]));
        assert!(filter.contains("lorem"));
        assert!(filter.contains("the"));
        assert_eq!(filter.len(), StopWordFilter::english().len() + 1);
    }

    #[test]
    fn all_stop_words_filter_to_empty() {
        let filter = StopWordFilter::english();
        assert!(filter.filter(&["the", "a", "of"]).is_empty());
    }
}
