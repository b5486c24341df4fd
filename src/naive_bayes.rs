//! Statistical polarity model: two-class multinomial naive Bayes.
//!
//! Trained once at startup, either on the embedded seed corpus or on a
//! labelled CSV corpus (`label,text` with labels `positive` / `negative`).
//! Word likelihoods use Laplace smoothing and are stored as logs.
//!
//! The polarity of a text is `P(positive | words) − P(negative | words)`,
//! which equals `tanh((log P⁺ − log P⁻) / 2)`. Words outside the training
//! vocabulary carry no evidence; a text with no known word scores `0.0`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::PolarityModel;

/// Laplace smoothing constant.
const ALPHA: f64 = 1.0;

/// Built-in training corpus. Written without stopwords so that function
/// words never carry class evidence.
pub const SEED_CORPUS: &[(Class, &str)] = &[
    (Class::Positive, "love video"),
    (Class::Positive, "loved every minute"),
    (Class::Positive, "great content thanks"),
    (Class::Positive, "amazing work keep going"),
    (Class::Positive, "best tutorial ever"),
    (Class::Positive, "awesome explanation"),
    (Class::Positive, "really helpful thank"),
    (Class::Positive, "beautiful song"),
    (Class::Positive, "fantastic editing"),
    (Class::Positive, "brilliant idea"),
    (Class::Positive, "excellent quality"),
    (Class::Positive, "enjoyed watching"),
    (Class::Positive, "wonderful performance"),
    (Class::Positive, "perfect timing"),
    (Class::Positive, "super useful tips"),
    (Class::Positive, "nice job"),
    (Class::Positive, "funny hilarious moments"),
    (Class::Positive, "incredible talent"),
    (Class::Positive, "happy watching"),
    (Class::Positive, "learned lot thanks"),
    (Class::Positive, "masterpiece"),
    (Class::Positive, "favorite channel"),
    (Class::Positive, "inspiring story"),
    (Class::Positive, "good stuff"),
    (Class::Positive, "cool trick worked"),
    (Class::Positive, "well explained clear"),
    (Class::Positive, "subscribed instantly love"),
    (Class::Positive, "legend"),
    (Class::Positive, "respect effort"),
    (Class::Positive, "recommend everyone"),
    (Class::Negative, "terrible video"),
    (Class::Negative, "hate"),
    (Class::Negative, "worst content ever"),
    (Class::Negative, "boring waste time"),
    (Class::Negative, "awful audio"),
    (Class::Negative, "bad quality"),
    (Class::Negative, "horrible editing"),
    (Class::Negative, "disappointed"),
    (Class::Negative, "misleading title clickbait"),
    (Class::Negative, "stupid idea"),
    (Class::Negative, "useless tips"),
    (Class::Negative, "annoying music"),
    (Class::Negative, "cringe"),
    (Class::Negative, "fake scam"),
    (Class::Negative, "garbage"),
    (Class::Negative, "wasted minutes"),
    (Class::Negative, "poor explanation"),
    (Class::Negative, "disliked"),
    (Class::Negative, "unsubscribed"),
    (Class::Negative, "sad"),
    (Class::Negative, "broken link"),
    (Class::Negative, "wrong information"),
    (Class::Negative, "lame jokes"),
    (Class::Negative, "pathetic effort"),
    (Class::Negative, "trash channel"),
    (Class::Negative, "boring slow"),
    (Class::Negative, "ugly thumbnail"),
    (Class::Negative, "dumb"),
    (Class::Negative, "fail"),
    (Class::Negative, "worse previous"),
];

/// Training class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Positive,
    Negative,
}

impl Class {
    fn index(self) -> usize {
        match self {
            Class::Positive => 0,
            Class::Negative => 1,
        }
    }

    fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => Some(Class::Positive),
            "negative" | "neg" => Some(Class::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CorpusRow {
    label: String,
    text: String,
}

/// Trained naive Bayes model.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    log_prior: [f64; 2],
    /// word -> [log P(word | positive), log P(word | negative)]
    log_likelihood: HashMap<String, [f64; 2]>,
}

impl NaiveBayesModel {
    /// Train on the embedded seed corpus.
    pub fn seeded() -> Self {
        Self::train(SEED_CORPUS.iter().map(|(class, text)| (*class, *text)))
            .expect("seed corpus covers both classes")
    }

    /// Train on labelled documents.
    ///
    /// # Errors
    ///
    /// Fails when either class has no document or no token.
    pub fn train<'a, I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Class, &'a str)>,
    {
        let mut doc_counts = [0usize; 2];
        let mut token_totals = [0usize; 2];
        let mut word_counts: HashMap<String, [usize; 2]> = HashMap::new();

        for (class, text) in documents {
            let c = class.index();
            doc_counts[c] += 1;
            for token in tokenize(text) {
                word_counts.entry(token).or_insert([0, 0])[c] += 1;
                token_totals[c] += 1;
            }
        }

        if doc_counts.iter().any(|&n| n == 0) || token_totals.iter().any(|&n| n == 0) {
            bail!("training corpus needs at least one non-empty positive and negative document");
        }

        let total_docs = (doc_counts[0] + doc_counts[1]) as f64;
        let log_prior = [
            (doc_counts[0] as f64 / total_docs).ln(),
            (doc_counts[1] as f64 / total_docs).ln(),
        ];

        let vocab_size = word_counts.len() as f64;
        let log_likelihood = word_counts
            .into_iter()
            .map(|(word, counts)| {
                let ll = [0, 1].map(|c| {
                    ((counts[c] as f64 + ALPHA) / (token_totals[c] as f64 + ALPHA * vocab_size))
                        .ln()
                });
                (word, ll)
            })
            .collect::<HashMap<_, _>>();

        debug!(
            positive_docs = doc_counts[0],
            negative_docs = doc_counts[1],
            vocabulary = log_likelihood.len(),
            "trained naive Bayes model"
        );

        Ok(Self {
            log_prior,
            log_likelihood,
        })
    }

    /// Train on a CSV corpus with `label` and `text` columns.
    ///
    /// Rows whose label is neither positive nor negative are skipped.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open training corpus: {}", path.display()))?;

        let mut documents = Vec::new();
        for (line, row) in reader.deserialize::<CorpusRow>().enumerate() {
            let row = row.with_context(|| {
                format!("Malformed corpus row {} in {}", line + 2, path.display())
            })?;
            match Class::parse(&row.label) {
                Some(class) => documents.push((class, row.text)),
                None => warn!(label = %row.label, "skipping corpus row with unknown label"),
            }
        }

        Self::train(documents.iter().map(|(class, text)| (*class, text.as_str())))
            .with_context(|| format!("Invalid training corpus: {}", path.display()))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.log_likelihood.len()
    }
}

impl PolarityModel for NaiveBayesModel {
    fn name(&self) -> &str {
        "naive-bayes"
    }

    fn polarity(&self, text: &str) -> f64 {
        let mut log_odds = [self.log_prior[0], self.log_prior[1]];
        let mut known = 0usize;
        for token in tokenize(text) {
            if let Some(ll) = self.log_likelihood.get(&token) {
                log_odds[0] += ll[0];
                log_odds[1] += ll[1];
                known += 1;
            }
        }
        if known == 0 {
            return 0.0;
        }
        ((log_odds[0] - log_odds[1]) / 2.0).tanh()
    }
}

/// Lowercase word tokens; apostrophes inside words are kept.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
