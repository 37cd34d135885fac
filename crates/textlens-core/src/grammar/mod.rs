//! Grammar checking.
//!
//! Grammar checking is delegated to a [`GrammarService`]. Two are provided:
//!
//! - [`BuiltinChecker`]: offline, rule-based checks for common mistakes
//! - [`LanguageToolClient`]: a client for a LanguageTool HTTP server
//!
//! Whatever the backend, results come back as [`GrammarIssue`] records. The
//! helpers in this module shape those records for display.

pub mod checker;
pub mod languagetool;

use std::sync::Arc;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use checker::BuiltinChecker;
pub use languagetool::LanguageToolClient;

use crate::config::{GrammarBackend, GrammarConfig};
use crate::error::ServiceResult;

/// Shown in place of suggestions when a service offers none.
pub const NO_SUGGESTIONS: &str = "No suggestions available";

/// Maximum number of suggestions shown per issue.
pub const MAX_DISPLAYED_SUGGESTIONS: usize = 5;

/// Maximum number of message characters shown in an issue title.
pub const TITLE_MESSAGE_CHARS: usize = 100;

/// A flagged span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GrammarIssue {
    /// Human-readable explanation.
    pub message: String,
    /// Text surrounding the flagged span.
    pub context: String,
    /// Category label (e.g. `GRAMMAR`, `TYPOS`, `PUNCTUATION`).
    pub category: String,
    /// Suggested replacements for the flagged span, best first.
    pub replacements: Vec<String>,
    /// Identifier of the rule that fired, if the service reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Start of the flagged span, in characters from the start of the text.
    pub offset: usize,
    /// Length of the flagged span, in characters.
    pub length: usize,
}

/// A service that finds grammar issues in text.
pub trait GrammarService: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Check `text` and return issues in document order.
    fn check(&self, text: &str) -> ServiceResult<Vec<GrammarIssue>>;
}

/// Suggestions for an issue, falling back to a placeholder when the service
/// offered none.
pub fn suggestions_for(issue: &GrammarIssue) -> Vec<String> {
    if issue.replacements.is_empty() {
        vec![NO_SUGGESTIONS.to_string()]
    } else {
        issue.replacements.clone()
    }
}

/// [`suggestions_for`], truncated to [`MAX_DISPLAYED_SUGGESTIONS`].
pub fn displayed_suggestions(issue: &GrammarIssue) -> Vec<String> {
    let mut suggestions = suggestions_for(issue);
    suggestions.truncate(MAX_DISPLAYED_SUGGESTIONS);
    suggestions
}

/// Title line for the `number`-th issue (1-indexed).
///
/// The message is cut to [`TITLE_MESSAGE_CHARS`] characters and always
/// followed by an ellipsis.
pub fn issue_title(number: usize, issue: &GrammarIssue) -> String {
    let message: String = issue.message.chars().take(TITLE_MESSAGE_CHARS).collect();
    format!("Issue #{number}: {message}...")
}

/// Build the grammar service selected by configuration.
pub fn service_from_config(config: &GrammarConfig) -> Arc<dyn GrammarService> {
    match config.backend {
        GrammarBackend::Builtin => Arc::new(BuiltinChecker::new()),
        GrammarBackend::LanguageTool => Arc::new(
            LanguageToolClient::new(&config.server_url)
                .with_language(&config.language)
                .with_timeout(Duration::from_secs(config.timeout_secs)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(message: &str, replacements: &[&str]) -> GrammarIssue {
        GrammarIssue {
            message: message.to_string(),
            context: "context".to_string(),
            category: "GRAMMAR".to_string(),
            replacements: replacements.iter().map(ToString::to_string).collect(),
            rule_id: None,
            offset: 0,
            length: 1,
        }
    }

    #[test]
    fn empty_replacements_fall_back_to_placeholder() {
        assert_eq!(
            suggestions_for(&issue("m", &[])),
            vec!["No suggestions available"]
        );
    }

    #[test]
    fn replacements_pass_through_unchanged() {
        assert_eq!(
            suggestions_for(&issue("m", &["foo", "bar"])),
            vec!["foo", "bar"]
        );
    }

    #[test]
    fn displayed_suggestions_capped_at_five() {
        let shown = displayed_suggestions(&issue("m", &["a", "b", "c", "d", "e", "f", "g"]));
        assert_eq!(shown, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn title_truncates_long_messages() {
        let long = "x".repeat(150);
        let title = issue_title(3, &issue(&long, &[]));
        assert_eq!(title, format!("Issue #3: {}...", "x".repeat(100)));
    }

    #[test]
    fn title_keeps_short_messages_whole() {
        let title = issue_title(1, &issue("Possible typo", &[]));
        assert_eq!(title, "Issue #1: Possible typo...");
    }

    #[test]
    fn factory_selects_backend() {
        let builtin = service_from_config(&GrammarConfig::default());
        assert_eq!(builtin.name(), "builtin");

        let remote = service_from_config(&GrammarConfig {
            backend: GrammarBackend::LanguageTool,
            ..GrammarConfig::default()
        });
        assert_eq!(remote.name(), "LanguageTool");
    }
}
