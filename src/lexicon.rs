//! Rule-based lexicon sentiment model.
//!
//! Each known word carries a valence on a -4..+4 scale. Valences are then
//! adjusted by the words around them:
//!
//! - **boosters / dampeners** ("very", "barely") in the three preceding
//!   tokens shift the valence by ±0.293, scaled 1.0 / 0.95 / 0.9 by distance
//! - **negation** ("not", "never", "…n't") in the three preceding tokens
//!   flips and damps the valence (× -0.74)
//! - **contrast**: valences before "but" are halved, after it × 1.5
//! - **emphasis**: an ALL-CAPS word in mixed-case text gains 0.733,
//!   exclamation marks add 0.292 each (up to 4), question marks add a
//!   little too
//!
//! The adjusted sum is squashed into `[-1, 1]` with
//! `sum / sqrt(sum² + 15)`.

use std::collections::HashMap;

use crate::traits::PolarityModel;

const BOOST_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "nowhere", "neither", "nor", "cannot",
    "without", "aint", "isnt", "dont", "doesnt", "didnt", "wasnt", "werent", "wont", "cant",
    "couldnt", "shouldnt", "wouldnt",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("amazingly", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT),
    ("especially", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("hugely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("insanely", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("super", BOOST_INCREMENT),
    ("thoroughly", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("truly", BOOST_INCREMENT),
    ("utterly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("barely", -BOOST_INCREMENT),
    ("hardly", -BOOST_INCREMENT),
    ("kinda", -BOOST_INCREMENT),
    ("less", -BOOST_INCREMENT),
    ("marginally", -BOOST_INCREMENT),
    ("partly", -BOOST_INCREMENT),
    ("scarcely", -BOOST_INCREMENT),
    ("slightly", -BOOST_INCREMENT),
    ("somewhat", -BOOST_INCREMENT),
    ("sorta", -BOOST_INCREMENT),
];

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("clear", 1.6),
    ("cool", 1.3),
    ("cute", 2.0),
    ("delightful", 2.9),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fun", 2.3),
    ("funny", 1.9),
    ("genius", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hilarious", 1.7),
    ("impressive", 2.3),
    ("incredible", 2.6),
    ("informative", 1.6),
    ("inspiring", 2.4),
    ("interesting", 1.7),
    ("legend", 2.0),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loving", 2.9),
    ("masterpiece", 3.1),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("positive", 2.3),
    ("recommend", 1.5),
    ("respect", 2.1),
    ("smart", 1.7),
    ("solid", 1.2),
    ("superb", 3.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yes", 1.7),
    // negative
    ("angry", -2.3),
    ("annoying", -1.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -2.1),
    ("cringe", -1.8),
    ("cringy", -1.8),
    ("dead", -3.3),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("dumb", -2.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fake", -2.1),
    ("garbage", -2.2),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("idiot", -2.3),
    ("lame", -1.8),
    ("lies", -1.8),
    ("lost", -1.3),
    ("mad", -2.2),
    ("mess", -1.5),
    ("misleading", -1.7),
    ("negative", -2.7),
    ("pathetic", -2.6),
    ("poor", -2.1),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scam", -2.3),
    ("shame", -2.1),
    ("sick", -2.3),
    ("slow", -0.9),
    ("stupid", -2.4),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("trash", -2.1),
    ("ugly", -2.3),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Lexicon-and-rules polarity model.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
}

impl LexiconModel {
    /// Model with the built-in lexicon.
    pub fn new() -> Self {
        Self {
            valences: VALENCES
                .iter()
                .map(|(w, v)| (w.to_string(), *v))
                .collect(),
            boosters: BOOSTERS
                .iter()
                .map(|(w, v)| (w.to_string(), *v))
                .collect(),
        }
    }

    /// Add or override lexicon entries.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (word, valence) in entries {
            self.valences.insert(word.into().to_lowercase(), valence);
        }
        self
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Sum of adjusted valences before squashing.
    fn raw_sum(&self, text: &str) -> f64 {
        let tokens: Vec<Token> = text.split_whitespace().filter_map(Token::parse).collect();
        if tokens.is_empty() {
            return 0.0;
        }

        let any_caps = tokens.iter().any(|t| t.all_caps);
        let cap_differential = any_caps && !tokens.iter().all(|t| t.all_caps);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if self.boosters.contains_key(&token.lower) {
                sentiments.push(0.0);
                continue;
            }
            let Some(mut valence) = self.valence(&token.lower) else {
                sentiments.push(0.0);
                continue;
            };

            if cap_differential && token.all_caps {
                valence += CAPS_INCREMENT * valence.signum();
            }

            for distance in 1..=3usize {
                if i < distance {
                    break;
                }
                let prev = &tokens[i - distance];
                if self.valence(&prev.lower).is_none() {
                    let mut scalar = self.booster_scalar(prev, valence, cap_differential);
                    if distance == 2 {
                        scalar *= 0.95;
                    } else if distance == 3 {
                        scalar *= 0.9;
                    }
                    valence += scalar;
                }
                if is_negation(&prev.lower) {
                    valence *= NEGATION_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but {
                    *s *= 0.5;
                } else if i > but {
                    *s *= 1.5;
                }
            }
        }

        let sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return 0.0;
        }
        sum + punctuation_emphasis(text) * sum.signum()
    }

    fn booster_scalar(&self, word: &Token, valence: f64, cap_differential: bool) -> f64 {
        let Some(&base) = self.boosters.get(&word.lower) else {
            return 0.0;
        };
        let mut scalar = if valence < 0.0 { -base } else { base };
        if cap_differential && word.all_caps {
            scalar += CAPS_INCREMENT * valence.signum();
        }
        scalar
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        let sum = self.raw_sum(text);
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

struct Token {
    lower: String,
    all_caps: bool,
}

impl Token {
    fn parse(raw: &str) -> Option<Self> {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return None;
        }
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        let all_caps = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
        Some(Self {
            lower: word.to_lowercase(),
            all_caps,
        })
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.chars().filter(|&c| c == '!').count().min(4);
    let questions = text.chars().filter(|&c| c == '?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations as f64 * 0.292 + question_boost
}
