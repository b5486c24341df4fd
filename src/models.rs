//! Core data models used throughout the pipeline.
//!
//! These types represent the comments, scored records, counts, and output
//! locations that flow from retrieval to the report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Canonical 11-character video identifier.
///
/// Only [`crate::reference::extract_id`] constructs one, so every value
/// matches the platform's identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoReference(pub(crate) String);

impl VideoReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A top-level comment exactly as retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Comment text after cleaning. Only lives while a comment is being scored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(pub(crate) String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete sentiment class.
///
/// The derived ordering (Positive, Negative, Neutral) is the canonical order
/// used for counts, exports and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored comment: original text, polarity, and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub comment: String,
    pub polarity: f64,
    pub label: SentimentLabel,
}

/// Ordered sequence of records for one run, in retrieval order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    pub records: Vec<SentimentRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SentimentRecord> {
        self.records.iter()
    }
}

/// Per-label counts over a dataset.
///
/// Sparse: a label that never occurs has no entry, and [`get`](Self::get)
/// reports it as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregateCounts(pub(crate) BTreeMap<SentimentLabel, usize>);

impl AggregateCounts {
    pub fn get(&self, label: SentimentLabel) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Share of `label` in `[0, 1]`; `0.0` for an empty dataset.
    pub fn proportion(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(label) as f64 / total as f64
    }

    /// Labels that occur at least once, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, usize)> + '_ {
        self.0.iter().map(|(label, count)| (*label, *count))
    }
}

/// Locations of the three artifacts written by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBundle {
    pub csv: PathBuf,
    pub pie_chart: PathBuf,
    pub bar_chart: PathBuf,
}
