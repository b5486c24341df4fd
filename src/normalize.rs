//! Comment text normalization.
//!
//! Turns raw comment text into a lowercase, punctuation-free, stopword-free
//! token string for the scoring models. Steps, in order:
//!
//! 1. lowercase
//! 2. drop URL-looking runs (`http…`, `https…`, `www…` up to whitespace)
//! 3. replace everything except ASCII letters, digits, whitespace and `'`
//!    with a space
//! 4. trim
//! 5. split into tokens on whitespace, stripping apostrophes that wrap a token
//! 6. drop stopwords
//! 7. rejoin with single spaces
//!
//! The output is a fixed point: cleaning it again returns it unchanged.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::NormalizedText;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").unwrap());

/// The NLTK English stopword list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven",
    "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
    "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
    "won", "won't", "wouldn", "wouldn't",
];

/// Cleans comment text. Holds its stopword set; build once, share freely.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
}

impl TextNormalizer {
    /// Normalizer with the built-in English stopword list.
    pub fn english() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Normalizer with a custom stopword list (entries are lowercased).
    pub fn with_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Clean `text`. Total: any input, including empty, yields a result.
    pub fn clean(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let without_urls = URL_REGEX.replace_all(&lowered, "");
        let filtered: String = without_urls
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '\'' {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let tokens: Vec<&str> = tokenize(filtered.trim())
            .filter(|t| !self.is_stopword(t))
            .collect();

        NormalizedText(tokens.join(" "))
    }

    /// Clean a JSON value; anything other than a string yields empty text.
    pub fn clean_value(&self, value: &serde_json::Value) -> NormalizedText {
        match value.as_str() {
            Some(text) => self.clean(text),
            None => NormalizedText::default(),
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Whitespace tokens with wrapping apostrophes removed.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clean(text: &str) -> String {
        TextNormalizer::english().clean(text).into_string()
    }

    #[test]
    fn lowercases_and_drops_stopwords() {
        assert_eq!(clean("I LOVE this!"), "love");
        assert_eq!(clean("This is terrible."), "terrible");
        assert_eq!(clean("It's okay I guess."), "okay guess");
    }

    #[test]
    fn strips_urls() {
        assert_eq!(
            clean("great tutorial https://example.com/watch?x=1 thanks"),
            "great tutorial thanks"
        );
        assert_eq!(clean("see www.example.org now"), "see");
        assert_eq!(clean("link:http://a.b/c"), "link");
    }

    #[test]
    fn removes_punctuation_keeps_apostrophes_inside_words() {
        assert_eq!(clean("best-video ever!!! rock'n'roll"), "best video ever rock'n'roll");
        assert_eq!(clean("'quoted' words"), "quoted words");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(clean("café olé 😀 great"), "caf ol great");
    }

    #[test]
    fn empty_and_all_stopwords_yield_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
        assert_eq!(clean("it is what it is"), "");
        assert!(TextNormalizer::english().clean("the a an").is_empty());
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "I love this!",
            "Check https://youtu.be/xyz and WWW.site.com!!",
            "   Mixed   CASE,  punctuation; and 'quotes'  ",
            "don't stop believin' 123",
            "ahttpx.y wwwz http",
            "İstanbul ÇOK güzel",
            "'''",
        ];
        let normalizer = TextNormalizer::english();
        for input in inputs {
            let once = normalizer.clean(input);
            let twice = normalizer.clean(once.as_str());
            assert_eq!(once, twice, "input: {:?}", input);
        }
    }

    #[test]
    fn non_string_json_yields_empty() {
        let normalizer = TextNormalizer::english();
        assert!(normalizer.clean_value(&json!(null)).is_empty());
        assert!(normalizer.clean_value(&json!(42)).is_empty());
        assert!(normalizer.clean_value(&json!(["love"])).is_empty());
        assert_eq!(normalizer.clean_value(&json!("So GOOD")).as_str(), "good");
    }

    #[test]
    fn custom_stopwords() {
        let normalizer = TextNormalizer::with_stopwords(["Video"]);
        assert_eq!(normalizer.clean("the video rocks").as_str(), "the rocks");
    }

    #[test]
    fn stopword_list_has_nltk_size() {
        let unique: HashSet<&str> = ENGLISH_STOPWORDS.iter().copied().collect();
        assert_eq!(unique.len(), 179);
    }
}
