//! Static writing advice shown alongside reports.

use schemars::JsonSchema;
use serde::Serialize;

/// One piece of writing advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct WritingTip {
    /// Short imperative heading.
    pub title: &'static str,
    /// One-sentence explanation.
    pub detail: &'static str,
}

/// The tips panel, in display order.
pub const WRITING_TIPS: &[WritingTip] = &[
    WritingTip {
        title: "Use Active Voice",
        detail: "Active voice makes your writing clearer and more direct",
    },
    WritingTip {
        title: "Be Concise",
        detail: "Remove unnecessary words and repetition",
    },
    WritingTip {
        title: "Check Punctuation",
        detail: "Pay attention to commas, periods, and other punctuation marks",
    },
    WritingTip {
        title: "Use Transition Words",
        detail: "Help your readers follow your thoughts with good transitions",
    },
    WritingTip {
        title: "Proofread",
        detail: "Always review your text before finalizing",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_tips_with_content() {
        assert_eq!(WRITING_TIPS.len(), 5);
        assert!(WRITING_TIPS.iter().all(|t| !t.title.is_empty() && !t.detail.is_empty()));
        assert_eq!(WRITING_TIPS[0].title, "Use Active Voice");
    }
}
