//! Word extraction for the search index.
//!
//! Turns document text into a deduplicated set of lower-cased alphanumeric
//! tokens. Pure functions only; the index decides what to do with the words.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common articles, auxiliary verbs and other fragments of English that carry
/// no semantic load on their own. Contractions are split at the apostrophe
/// during tokenization, which is why bare fragments like "isn" and "t" appear
/// here.
static ENGLISH_COMMON_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "the", "to", "of", "or", "a", "an", "in", "is", "isn", "t", "doesn", "ain", "didn",
        "did", "was", "wasn", "were", "weren", "would", "wouldn", "m", "am", "be", "that",
        "on", "are", "aren",
    ])
});

/// Immutable set of tokens excluded from indexing.
///
/// Injected into whoever tokenizes; there is no process-wide mutable state.
#[derive(Debug, Clone, Default)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    /// Empty ignore list: every token is kept.
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    /// The built-in English common-word list.
    pub fn english_common() -> Self {
        Self(ENGLISH_COMMON_WORDS.iter().map(|w| w.to_string()).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for StopWords {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().map(|w| w.to_lowercase()).collect())
    }
}

/// Returns the set of unique normalized words in `text`.
///
/// Splits on any rune that is neither a letter nor a digit (Unicode-aware),
/// lower-cases every token, then drops tokens present in `stop_words`.
// TODO: handle contractions such as "aren't" and "doesn't" instead of
// splitting them at the apostrophe into two tokens.
pub fn words(text: &str, stop_words: &StopWords) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .filter(|token| !stop_words.contains(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        let tokens = words("Hello, world! foo-bar\tbaz\nqux", &StopWords::none());
        for expected in ["hello", "world", "foo", "bar", "baz", "qux"] {
            assert!(tokens.contains(expected), "missing {expected}: {tokens:?}");
        }
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn lower_cases_and_dedupes() {
        let tokens = words("Gregor GREGOR gregor", &StopWords::none());
        assert_eq!(tokens, HashSet::from(["gregor".to_string()]));
    }

    #[test]
    fn keeps_digits() {
        let tokens = words("room 237 floor2", &StopWords::none());
        assert!(tokens.contains("237"));
        assert!(tokens.contains("floor2"));
    }

    #[test]
    fn contractions_split_at_apostrophe() {
        let tokens = words("they aren't here", &StopWords::none());
        assert!(tokens.contains("aren"));
        assert!(tokens.contains("t"));
        assert!(!tokens.contains("aren't"));
    }

    #[test]
    fn is_idempotent() {
        let text = "One morning, when Gregor Samsa woke from troubled dreams";
        assert_eq!(words(text, &StopWords::none()), words(text, &StopWords::none()));
    }

    #[test]
    fn filters_stop_words_case_insensitively() {
        let stop = StopWords::english_common();
        let tokens = words("The waltz THAT was played", &stop);
        assert!(!tokens.contains("the"));
        assert!(!tokens.contains("that"));
        assert!(!tokens.contains("was"));
        assert!(tokens.contains("waltz"));
        assert!(tokens.contains("played"));
    }

    #[test]
    fn result_never_intersects_stop_list() {
        let stop = StopWords::english_common();
        let tokens = words(
            "the quick brown fox wouldn't have been in an empty room",
            &stop,
        );
        for token in &tokens {
            assert!(!stop.contains(token), "stop word {token} leaked through");
        }
    }

    #[test]
    fn custom_stop_list_is_normalized() {
        let stop: StopWords = ["Fox".to_string()].into_iter().collect();
        let tokens = words("The FOX jumps", &stop);
        assert!(!tokens.contains("fox"));
        assert!(tokens.contains("jumps"));
    }
}
