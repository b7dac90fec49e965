//! Lexicon-based sentiment classification.
//!
//! Classification is deterministic: a text is positive or negative purely on
//! how many lexicon terms it contains, so any result can be explained by
//! looking at [`SentimentScore`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Texts with fewer non-whitespace characters than this are always neutral
pub const MIN_CLASSIFIABLE_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positive and negative term lists used by [`SentimentScorer`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentLexicon {
    #[serde(default = "default_positive_terms")]
    pub positive: Vec<String>,
    #[serde(default = "default_negative_terms")]
    pub negative: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: default_positive_terms(),
            negative: default_negative_terms(),
        }
    }
}

fn default_positive_terms() -> Vec<String> {
    [
        "good",
        "great",
        "excellent",
        "amazing",
        "fantastic",
        "love",
        "perfect",
        "wonderful",
        "outstanding",
        "satisfied",
        "happy",
        "pleased",
    ]
    .iter()
    .map(|term| term.to_string())
    .collect()
}

fn default_negative_terms() -> Vec<String> {
    [
        "bad",
        "terrible",
        "awful",
        "hate",
        "horrible",
        "disappointing",
        "frustrated",
        "angry",
        "unsatisfied",
        "poor",
        "worst",
    ]
    .iter()
    .map(|term| term.to_string())
    .collect()
}

/// Per-text hit counts behind a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentScore {
    /// Number of distinct positive terms found in the text
    pub positive_hits: usize,
    /// Number of distinct negative terms found in the text
    pub negative_hits: usize,
    pub sentiment: Sentiment,
}

impl SentimentScore {
    fn neutral() -> Self {
        Self {
            positive_hits: 0,
            negative_hits: 0,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Classifies a single text as positive, neutral or negative.
///
/// Terms are matched as case-insensitive substrings anywhere in the text,
/// and each term contributes at most one hit no matter how often it repeats.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SentimentScorer {
    pub fn new(lexicon: &SentimentLexicon) -> Self {
        Self {
            positive: normalize_terms(&lexicon.positive),
            negative: normalize_terms(&lexicon.negative),
        }
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        self.score(text).sentiment
    }

    pub fn score(&self, text: &str) -> SentimentScore {
        let significant = text.chars().filter(|c| !c.is_whitespace()).count();
        if significant < MIN_CLASSIFIABLE_CHARS {
            return SentimentScore::neutral();
        }

        let text = text.to_lowercase();
        let positive_hits = count_hits(&self.positive, &text);
        let negative_hits = count_hits(&self.negative, &text);

        let sentiment = if positive_hits > negative_hits {
            Sentiment::Positive
        } else if negative_hits > positive_hits {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        SentimentScore {
            positive_hits,
            negative_hits,
            sentiment,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(&SentimentLexicon::default())
    }
}

fn count_hits(terms: &[String], lowered_text: &str) -> usize {
    terms
        .iter()
        .filter(|term| lowered_text.contains(term.as_str()))
        .count()
}

/// Lowercase, trim and de-duplicate terms, keeping first-seen order
pub(crate) fn normalize_terms(terms: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if term.is_empty() || normalized.contains(&term) {
            continue;
        }
        normalized.push(term);
    }
    normalized
}
