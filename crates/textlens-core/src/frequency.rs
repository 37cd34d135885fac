//! Word-frequency tally.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::text;

/// Number of entries returned when the caller does not choose one.
pub const DEFAULT_TOP_N: usize = 10;

/// One row of a word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequencyEntry {
    /// Lowercased token, punctuation included.
    pub word: String,
    /// Number of occurrences (always at least 1).
    pub count: usize,
}

impl WordFrequencyEntry {
    fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Count the `top_n` most frequent tokens in `text`.
///
/// The text is lowercased and split on whitespace runs. Tokens are compared
/// exactly, so `"dog"` and `"dog."` are different words. Entries are ordered
/// by descending count; tokens with equal counts keep the order in which
/// they first appeared.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidArgument`] when `top_n` is zero.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn word_frequency(text: &str, top_n: usize) -> AnalysisResult<Vec<WordFrequencyEntry>> {
    if top_n == 0 {
        return Err(AnalysisError::InvalidArgument {
            name: "top_n",
            reason: "must be at least 1".to_string(),
        });
    }

    let lowered = text.to_lowercase();
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in text::tokens(&lowered) {
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut entries: Vec<WordFrequencyEntry> = counts
        .into_iter()
        .map(|(word, count)| WordFrequencyEntry::new(word, count))
        .collect();
    // Stable sort: equal counts stay in first-seen order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);

    tracing::debug!(entries = entries.len(), "word frequency computed");
    Ok(entries)
}
