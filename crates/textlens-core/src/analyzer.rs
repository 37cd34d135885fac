//! Text statistics.
//!
//! [`TextAnalyzer`] counts words and characters itself and delegates sentence
//! counting and sentiment polarity to an injected [`LanguageAnalyzer`].

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;
use crate::frequency::{self, WordFrequencyEntry};
use crate::sentiment::{LanguageAnalyzer, LexiconAnalyzer, SentimentLabel};
use crate::text;

/// Summary statistics for one submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Statistics {
    /// Number of whitespace-delimited tokens.
    pub word_count: usize,
    /// Number of characters, untrimmed.
    pub char_count: usize,
    /// Number of sentences reported by the language analyzer.
    pub sentence_count: usize,
    /// Sentiment polarity in [-1, 1].
    pub sentiment_polarity: f64,
    /// Classification of `sentiment_polarity`.
    pub sentiment_label: SentimentLabel,
}

impl Statistics {
    /// Statistics of the empty string.
    pub const fn empty() -> Self {
        Self {
            word_count: 0,
            char_count: 0,
            sentence_count: 0,
            sentiment_polarity: 0.0,
            sentiment_label: SentimentLabel::Neutral,
        }
    }
}

/// Computes [`Statistics`] and word frequencies.
#[derive(Clone)]
pub struct TextAnalyzer {
    language: Arc<dyn LanguageAnalyzer>,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(LexiconAnalyzer::new()))
    }
}

impl std::fmt::Debug for TextAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAnalyzer").finish_non_exhaustive()
    }
}

impl TextAnalyzer {
    /// Create an analyzer backed by the given language engine.
    pub fn new(language: Arc<dyn LanguageAnalyzer>) -> Self {
        Self { language }
    }

    /// Compute statistics for `text`.
    ///
    /// The text is handed to the language analyzer unmodified. Empty text
    /// short-circuits to [`Statistics::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::Service`] if the language analyzer fails.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult<Statistics> {
        if text.is_empty() {
            return Ok(Statistics::empty());
        }

        let language = self.language.analyze(text)?;
        let polarity = if language.polarity.is_nan() {
            0.0
        } else {
            language.polarity.clamp(-1.0, 1.0)
        };

        let stats = Statistics {
            word_count: text::token_count(text),
            char_count: text.chars().count(),
            sentence_count: language.sentence_count,
            sentiment_polarity: polarity,
            sentiment_label: SentimentLabel::from_polarity(polarity),
        };
        tracing::debug!(
            words = stats.word_count,
            sentences = stats.sentence_count,
            sentiment = %stats.sentiment_label,
            "statistics computed"
        );
        Ok(stats)
    }

    /// The `top_n` most frequent tokens of `text`.
    ///
    /// See [`frequency::word_frequency`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnalysisError::InvalidArgument`] when `top_n` is zero.
    pub fn word_frequency(
        &self,
        text: &str,
        top_n: usize,
    ) -> AnalysisResult<Vec<WordFrequencyEntry>> {
        frequency::word_frequency(text, top_n)
    }
}
