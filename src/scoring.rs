//! Sentiment scoring policies.
//!
//! A [`SentimentScorer`] owns the normalizer and both polarity models and
//! applies exactly one [`ScoringPolicy`]:
//!
//! | Policy        | Input text | Score                                   | Labels          |
//! |---------------|------------|-----------------------------------------|-----------------|
//! | `Blended`     | normalized | `w_lex * lexicon + w_stat * statistical` | `>= pos`, `<= neg` |
//! | `Statistical` | raw        | `statistical`                           | `> pos`, `< neg`  |
//!
//! Blended is the default. Thresholds are the only place a score becomes a
//! label; see [`Thresholds::label`].

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::config::{PolicyKind, ScoringConfig};
use crate::lexicon::LexiconModel;
use crate::models::{Comment, SentimentLabel, SentimentRecord};
use crate::naive_bayes::NaiveBayesModel;
use crate::normalize::TextNormalizer;
use crate::traits::PolarityModel;

/// Score-to-label cut points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
    /// `true`: a score equal to a threshold takes that threshold's label.
    pub inclusive: bool,
}

impl Thresholds {
    pub fn label(&self, score: f64) -> SentimentLabel {
        let (is_positive, is_negative) = if self.inclusive {
            (score >= self.positive, score <= self.negative)
        } else {
            (score > self.positive, score < self.negative)
        };
        if is_positive {
            SentimentLabel::Positive
        } else if is_negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringPolicy {
    Blended {
        lexicon_weight: f64,
        statistical_weight: f64,
        thresholds: Thresholds,
    },
    Statistical {
        thresholds: Thresholds,
    },
}

impl ScoringPolicy {
    pub fn from_config(config: &ScoringConfig) -> Self {
        match config.policy {
            PolicyKind::Blended => ScoringPolicy::Blended {
                lexicon_weight: config.blended.lexicon_weight,
                statistical_weight: config.blended.statistical_weight,
                thresholds: Thresholds {
                    positive: config.blended.positive_threshold,
                    negative: config.blended.negative_threshold,
                    inclusive: true,
                },
            },
            PolicyKind::Statistical => ScoringPolicy::Statistical {
                thresholds: Thresholds {
                    positive: config.statistical.positive_threshold,
                    negative: config.statistical.negative_threshold,
                    inclusive: false,
                },
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringPolicy::Blended { .. } => "blended",
            ScoringPolicy::Statistical { .. } => "statistical",
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        match self {
            ScoringPolicy::Blended { thresholds, .. } => thresholds,
            ScoringPolicy::Statistical { thresholds } => thresholds,
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

/// Label and polarity of one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub label: SentimentLabel,
    pub polarity: f64,
}

/// Component scores behind a [`Score`], for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub policy: &'static str,
    /// Text the models saw.
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<f64>,
    pub statistical: f64,
    pub polarity: f64,
    pub label: SentimentLabel,
}

/// Scores comment text under one policy.
pub struct SentimentScorer {
    normalizer: TextNormalizer,
    lexicon: Arc<dyn PolarityModel>,
    statistical: Arc<dyn PolarityModel>,
    policy: ScoringPolicy,
}

impl SentimentScorer {
    pub fn new(
        normalizer: TextNormalizer,
        lexicon: Arc<dyn PolarityModel>,
        statistical: Arc<dyn PolarityModel>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            normalizer,
            lexicon,
            statistical,
            policy,
        }
    }

    /// Build the models named by `config`. Fails only when a configured
    /// training corpus cannot be read.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let statistical = match &config.corpus_path {
            Some(path) => NaiveBayesModel::from_csv(path)?,
            None => NaiveBayesModel::seeded(),
        };
        let policy = ScoringPolicy::from_config(config);
        info!(
            policy = policy.name(),
            vocabulary = statistical.vocabulary_size(),
            "sentiment scorer ready"
        );
        Ok(Self::new(
            TextNormalizer::english(),
            Arc::new(LexiconModel::new()),
            Arc::new(statistical),
            policy,
        ))
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn score(&self, text: &str) -> Score {
        let breakdown = self.explain(text);
        Score {
            label: breakdown.label,
            polarity: breakdown.polarity,
        }
    }

    pub fn explain(&self, text: &str) -> ScoreBreakdown {
        match &self.policy {
            ScoringPolicy::Blended {
                lexicon_weight,
                statistical_weight,
                thresholds,
            } => {
                let cleaned = self.normalizer.clean(text);
                let lexicon = self.lexicon.polarity(cleaned.as_str());
                let statistical = self.statistical.polarity(cleaned.as_str());
                let polarity = lexicon_weight * lexicon + statistical_weight * statistical;
                ScoreBreakdown {
                    policy: self.policy.name(),
                    input: cleaned.into_string(),
                    lexicon: Some(lexicon),
                    statistical,
                    polarity,
                    label: thresholds.label(polarity),
                }
            }
            ScoringPolicy::Statistical { thresholds } => {
                let statistical = self.statistical.polarity(text);
                ScoreBreakdown {
                    policy: self.policy.name(),
                    input: text.to_string(),
                    lexicon: None,
                    statistical,
                    polarity: statistical,
                    label: thresholds.label(statistical),
                }
            }
        }
    }

    /// Score a retrieved comment into a dataset record.
    pub fn score_comment(&self, comment: &Comment) -> SentimentRecord {
        let Score { label, polarity } = self.score(&comment.text);
        SentimentRecord {
            comment: comment.text.clone(),
            polarity,
            label,
        }
    }
}
