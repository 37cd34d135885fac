//! Sentiment polarity and sentence counting.
//!
//! The [`LanguageAnalyzer`] trait is the seam between the text statistics and
//! whatever natural-language engine produces polarity. [`LexiconAnalyzer`]
//! is the built-in, offline engine.

pub mod lexicon;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::text;

/// How many tokens back a negator still flips an opinion word.
const NEGATION_WINDOW: usize = 3;

/// Factor applied to a negated opinion word.
const NEGATION_FACTOR: f64 = -0.5;

/// Result of running a language analyzer over a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageAnalysis {
    /// Sentiment polarity in [-1, 1].
    pub polarity: f64,
    /// Number of sentences detected.
    pub sentence_count: usize,
}

/// Three-way sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SentimentLabel {
    /// Polarity above zero.
    Positive,
    /// Polarity below zero.
    Negative,
    /// Polarity exactly zero.
    Neutral,
}

impl SentimentLabel {
    /// Classify a polarity score.
    ///
    /// The comparison is exact: any value above zero is positive, any value
    /// below zero is negative, and only zero (or NaN) is neutral.
    pub const fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Human-readable label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A natural-language engine that scores polarity and counts sentences.
pub trait LanguageAnalyzer: Send + Sync {
    /// Analyze `text` exactly as given.
    fn analyze(&self, text: &str) -> ServiceResult<LanguageAnalysis>;
}

/// Lexicon-based analyzer.
///
/// Polarity is the mean prior polarity of the opinion words in the text.
/// An intensifier directly before an opinion word scales it, and a negator
/// up to three words earlier flips it with damping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    /// Create a new analyzer.
    pub const fn new() -> Self {
        Self
    }

    /// Polarity of `text` in [-1, 1].
    pub fn polarity(&self, text: &str) -> f64 {
        let words = text::words(text);
        let mut scores = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(&prior) = lexicon::POLARITY.get(word.as_str()) else {
                continue;
            };

            let mut score = prior;
            if let Some(prev) = i.checked_sub(1).map(|p| words[p].as_str())
                && let Some(&factor) = lexicon::INTENSIFIERS.get(prev)
            {
                score *= factor;
            }

            let window = &words[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|w| lexicon::NEGATORS.contains(w.as_str())) {
                score *= NEGATION_FACTOR;
            }

            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl LanguageAnalyzer for LexiconAnalyzer {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn analyze(&self, text: &str) -> ServiceResult<LanguageAnalysis> {
        Ok(LanguageAnalysis {
            polarity: self.polarity(text),
            sentence_count: text::split_sentences(text).len(),
        })
    }
}
