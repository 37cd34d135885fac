//! One analysis pass over submitted text.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Statistics, TextAnalyzer};
use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use crate::frequency::{DEFAULT_TOP_N, WordFrequencyEntry};
use crate::grammar::{self, GrammarIssue, GrammarService};

/// Everything produced for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    /// Summary statistics.
    pub statistics: Statistics,
    /// Grammar issues in document order.
    pub issues: Vec<GrammarIssue>,
    /// Most frequent words, most frequent first.
    pub frequencies: Vec<WordFrequencyEntry>,
}

/// Holds the grammar service and analyzer used for every submission.
///
/// A session is cheap to clone; clones share the same services.
#[derive(Clone)]
pub struct Session {
    grammar: Arc<dyn GrammarService>,
    analyzer: TextAnalyzer,
    top_n: usize,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("grammar", &self.grammar.name())
            .field("top_n", &self.top_n)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidArgument`] when `top_n` is zero.
    pub fn new(
        grammar: Arc<dyn GrammarService>,
        analyzer: TextAnalyzer,
        top_n: usize,
    ) -> AnalysisResult<Self> {
        if top_n == 0 {
            return Err(AnalysisError::InvalidArgument {
                name: "top_n",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            grammar,
            analyzer,
            top_n,
        })
    }

    /// Session with the configured grammar backend and the default analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidArgument`] when `top_words` is zero.
    pub fn from_config(config: &Config) -> AnalysisResult<Self> {
        Self::new(
            grammar::service_from_config(&config.grammar),
            TextAnalyzer::default(),
            config.top_words,
        )
    }

    /// The grammar service.
    pub fn grammar(&self) -> &dyn GrammarService {
        self.grammar.as_ref()
    }

    /// The statistics analyzer.
    pub const fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    /// Number of words kept in [`Report::frequencies`].
    pub const fn top_n(&self) -> usize {
        self.top_n
    }

    /// Run grammar, statistics and frequency over `text`.
    ///
    /// Whitespace-only text is not analyzed and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Service`] if the grammar service or the
    /// language analyzer fails. Nothing is kept from a failed pass.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), grammar = self.grammar.name()))]
    pub fn submit(&self, text: &str) -> AnalysisResult<Option<Report>> {
        if text.trim().is_empty() {
            tracing::debug!("blank submission ignored");
            return Ok(None);
        }

        let issues = self.grammar.check(text)?;
        let statistics = self.analyzer.analyze(text)?;
        let frequencies = self.analyzer.word_frequency(text, self.top_n)?;

        tracing::debug!(
            issues = issues.len(),
            words = statistics.word_count,
            "submission analyzed"
        );
        Ok(Some(Report {
            statistics,
            issues,
            frequencies,
        }))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            grammar: Arc::new(grammar::BuiltinChecker::new()),
            analyzer: TextAnalyzer::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}
