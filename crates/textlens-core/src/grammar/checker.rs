//! Offline rule-based grammar checker.
//!
//! Flags repeated whitespace, repeated words, missing terminal punctuation,
//! subject-verb disagreement, double negatives, run-on sentences, and comma
//! splices. Each issue carries the sentence it was found in as context.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{GrammarIssue, GrammarService};
use crate::error::ServiceResult;
use crate::text::{self, Sentence};

const CATEGORY_GRAMMAR: &str = "GRAMMAR";
const CATEGORY_PUNCTUATION: &str = "PUNCTUATION";
const CATEGORY_STYLE: &str = "STYLE";
const CATEGORY_TYPOGRAPHY: &str = "TYPOGRAPHY";
const CATEGORY_TYPOS: &str = "TYPOS";

static MULTIPLE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Pronoun followed by a verb form that disagrees with it.
static PRONOUN_AGREEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(he|she|it)\s+(are|were|have)\b|\b(they|we|you)\s+(is|was|has)\b")
        .expect("valid regex")
});

/// "the <noun> <verb>" where the noun's number may not match the verb.
static NOUN_AGREEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bthe\s+([a-z]+)\s+(are|were|have|is|was|has)\b").expect("valid regex")
});

static DOUBLE_NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(don't|doesn't|didn't|won't|can't|couldn't|shouldn't|wouldn't)\s+(\w+)\s+(no|nothing|nobody|never|nowhere|neither)\b",
    )
    .expect("valid regex")
});

static RUN_ON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),\s+(and|but|or|so)\s+\w+\s+\w+\s*,\s+(and|but|or|so)\b").expect("valid regex")
});

static SUBJECT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "you", "he", "she", "it", "we", "they", "this", "that", "there",
    ]
    .into_iter()
    .collect()
});

static FINITE_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "am", "is", "are", "was", "were", "has", "have", "had", "do", "does", "did", "will",
        "would", "can", "could", "should", "may", "might", "must", "shall", "goes", "went",
        "makes", "made", "gets", "got", "says", "said", "knows", "knew", "thinks", "thought",
        "comes", "came", "takes", "took", "sees", "saw", "wants", "wanted", "looks", "looked",
        "uses", "used", "finds", "found", "gives", "gave", "tells", "told", "works", "worked",
        "feels", "felt", "needs", "needed", "runs", "ran", "keeps", "kept", "writes", "wrote",
        "reads", "seems", "seemed", "likes", "liked", "love", "loves", "loved", "hate", "hates",
        "left", "began", "stood", "heard", "moved", "lived", "happened",
    ]
    .into_iter()
    .collect()
});

const CONJUNCTIONS: &[&str] = &["and", "but", "or", "so", "yet", "nor", "for", "because"];

/// Rule-based grammar checker that needs no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinChecker;

impl BuiltinChecker {
    /// Create a new checker.
    pub const fn new() -> Self {
        Self
    }

    fn check_sentence(sentence: &Sentence, issues: &mut Vec<GrammarIssue>) {
        let rules: [fn(&Sentence) -> Vec<GrammarIssue>; 7] = [
            multiple_spaces,
            repeated_words,
            missing_punctuation,
            subject_verb_agreement,
            double_negative,
            run_on,
            comma_splice,
        ];
        let start = issues.len();
        for rule in rules {
            issues.extend(rule(sentence));
        }
        issues[start..].sort_by_key(|i| i.offset);
    }
}

impl GrammarService for BuiltinChecker {
    fn name(&self) -> &str {
        "builtin"
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn check(&self, text: &str) -> ServiceResult<Vec<GrammarIssue>> {
        let sentences = text::sentence_spans(text);
        let mut issues = Vec::new();
        for sentence in &sentences {
            Self::check_sentence(sentence, &mut issues);
        }
        tracing::debug!(
            sentences = sentences.len(),
            issues = issues.len(),
            "builtin grammar check complete"
        );
        Ok(issues)
    }
}

/// Build an issue for the span `[byte_start, byte_end)` of `sentence.text`.
fn issue_at(
    sentence: &Sentence,
    byte_start: usize,
    byte_end: usize,
    category: &str,
    rule_id: &str,
    message: impl Into<String>,
    replacements: Vec<String>,
) -> GrammarIssue {
    let offset = sentence.start + sentence.text[..byte_start].chars().count();
    let length = sentence.text[byte_start..byte_end].chars().count();
    GrammarIssue {
        message: message.into(),
        context: sentence.text.clone(),
        category: category.to_string(),
        replacements,
        rule_id: Some(rule_id.to_string()),
        offset,
        length,
    }
}

/// Words of a sentence with their byte ranges, punctuation trimmed.
fn word_ranges(sentence: &str) -> Vec<(usize, usize, &str)> {
    let mut ranges = Vec::new();
    let mut pos = 0;
    for token in sentence.split_whitespace() {
        let Some(found) = sentence[pos..].find(token) else {
            continue;
        };
        let token_start = pos + found;
        pos = token_start + token.len();

        // Inner apostrophes survive ("don't"); anything non-alphanumeric at the edges goes.
        let after_lead = token.trim_start_matches(|c: char| !c.is_alphanumeric());
        let lead = token.len() - after_lead.len();
        let word = after_lead.trim_end_matches(|c: char| !c.is_alphanumeric());
        if !word.is_empty() {
            let start = token_start + lead;
            ranges.push((start, start + word.len(), word));
        }
    }
    ranges
}

fn multiple_spaces(sentence: &Sentence) -> Vec<GrammarIssue> {
    MULTIPLE_SPACES
        .find_iter(&sentence.text)
        .map(|m| {
            issue_at(
                sentence,
                m.start(),
                m.end(),
                CATEGORY_TYPOGRAPHY,
                "WHITESPACE_RULE",
                "Possible typo: you repeated a whitespace",
                vec![" ".to_string()],
            )
        })
        .collect()
}

fn repeated_words(sentence: &Sentence) -> Vec<GrammarIssue> {
    let words = word_ranges(&sentence.text);
    words
        .windows(2)
        .filter(|pair| {
            let (_, prev_end, prev) = pair[0];
            let (start, _, word) = pair[1];
            // Only adjacent words: nothing but whitespace between them.
            word.chars().any(char::is_alphabetic)
                && prev.eq_ignore_ascii_case(word)
                && sentence.text[prev_end..start].chars().all(char::is_whitespace)
        })
        .map(|pair| {
            let (start, _, prev) = pair[0];
            let (_, end, _) = pair[1];
            issue_at(
                sentence,
                start,
                end,
                CATEGORY_TYPOS,
                "ENGLISH_WORD_REPEAT_RULE",
                "Possible typo: you repeated a word",
                vec![prev.to_string()],
            )
        })
        .collect()
}

fn missing_punctuation(sentence: &Sentence) -> Vec<GrammarIssue> {
    let trimmed = sentence
        .text
        .trim_end_matches(|c: char| matches!(c, '"' | '\'' | ')' | '\u{201d}' | '\u{2019}'));
    if trimmed.ends_with(['.', '!', '?', ':', ';']) {
        return Vec::new();
    }
    let Some(&(start, end, word)) = word_ranges(&sentence.text).last() else {
        return Vec::new();
    };
    vec![issue_at(
        sentence,
        start,
        end,
        CATEGORY_PUNCTUATION,
        "PUNCTUATION_PARAGRAPH_END",
        "This sentence does not end with terminal punctuation",
        vec![format!("{word}.")],
    )]
}

/// Replacement verb for a pronoun/verb pair that disagrees.
fn agreeing_verb(verb: &str) -> Option<&'static str> {
    match verb.to_lowercase().as_str() {
        "are" => Some("is"),
        "were" => Some("was"),
        "have" => Some("has"),
        "is" => Some("are"),
        "was" => Some("were"),
        "has" => Some("have"),
        _ => None,
    }
}

fn subject_verb_agreement(sentence: &Sentence) -> Vec<GrammarIssue> {
    let mut issues: Vec<GrammarIssue> = PRONOUN_AGREEMENT
        .captures_iter(&sentence.text)
        .filter_map(|caps| {
            let (subject, verb, singular) = match (caps.get(1), caps.get(2)) {
                (Some(s), Some(v)) => (s, v, true),
                _ => (caps.get(3)?, caps.get(4)?, false),
            };
            let fixed = agreeing_verb(verb.as_str())?;
            let message = if singular {
                format!("The singular subject \"{}\" requires a singular verb", subject.as_str())
            } else {
                format!("The plural subject \"{}\" requires a plural verb", subject.as_str())
            };
            let whole = caps.get(0)?;
            Some(issue_at(
                sentence,
                whole.start(),
                whole.end(),
                CATEGORY_GRAMMAR,
                "SUBJECT_VERB_AGREEMENT",
                message,
                vec![format!("{} {fixed}", subject.as_str())],
            ))
        })
        .collect();

    issues.extend(
        NOUN_AGREEMENT
            .captures_iter(&sentence.text)
            .filter_map(|caps| noun_agreement(sentence, &caps)),
    );
    issues
}

fn noun_agreement(sentence: &Sentence, caps: &Captures<'_>) -> Option<GrammarIssue> {
    let noun = caps.get(1)?.as_str();
    let verb = caps.get(2)?;
    let lower = noun.to_lowercase();
    let looks_plural = lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us");
    let verb_is_plural = matches!(verb.as_str().to_lowercase().as_str(), "are" | "were" | "have");
    if looks_plural == verb_is_plural || lower.len() < 3 {
        return None;
    }
    // Irregular plurals and mass nouns are too common to flag.
    if matches!(
        lower.as_str(),
        "people" | "children" | "men" | "women" | "police" | "data" | "media" | "team" | "staff"
    ) {
        return None;
    }
    let fixed = agreeing_verb(verb.as_str())?;
    let message = if verb_is_plural {
        format!("Possible agreement error: \"{noun}\" looks singular but the verb is plural")
    } else {
        format!("Possible agreement error: \"{noun}\" looks plural but the verb is singular")
    };
    Some(issue_at(
        sentence,
        verb.start(),
        verb.end(),
        CATEGORY_GRAMMAR,
        "NOUN_VERB_AGREEMENT",
        message,
        vec![fixed.to_string()],
    ))
}

/// Positive counterpart of a negative word.
fn positive_form(negative: &str) -> Option<&'static str> {
    match negative.to_lowercase().as_str() {
        "no" => Some("any"),
        "nothing" => Some("anything"),
        "nobody" => Some("anybody"),
        "never" => Some("ever"),
        "nowhere" => Some("anywhere"),
        "neither" => Some("either"),
        _ => None,
    }
}

fn double_negative(sentence: &Sentence) -> Vec<GrammarIssue> {
    DOUBLE_NEGATIVE
        .captures_iter(&sentence.text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let fixed = positive_form(caps.get(3)?.as_str())?;
            let replacement = format!("{} {} {fixed}", &caps[1], &caps[2]);
            Some(issue_at(
                sentence,
                whole.start(),
                whole.end(),
                CATEGORY_GRAMMAR,
                "DOUBLE_NEGATIVE",
                "Double negative: two negatives in the same clause cancel each other out",
                vec![replacement],
            ))
        })
        .collect()
}

fn run_on(sentence: &Sentence) -> Vec<GrammarIssue> {
    RUN_ON
        .find(&sentence.text)
        .map(|m| {
            issue_at(
                sentence,
                m.start(),
                m.end(),
                CATEGORY_STYLE,
                "RUN_ON_SENTENCE",
                "Possible run-on sentence: several clauses are chained with conjunctions",
                Vec::new(),
            )
        })
        .into_iter()
        .collect()
}

fn comma_splice(sentence: &Sentence) -> Vec<GrammarIssue> {
    let text = &sentence.text;
    let mut issues = Vec::new();
    let mut clause_start = 0;
    let mut previous_independent = false;

    for (comma, _) in text.match_indices(',').chain(std::iter::once((text.len(), ""))) {
        let clause = &text[clause_start..comma];
        let independent = is_independent_clause(clause);
        if previous_independent && independent && clause_start > 0 {
            let at = clause_start - 1;
            issues.push(issue_at(
                sentence,
                at,
                clause_start,
                CATEGORY_STYLE,
                "COMMA_SPLICE",
                "Possible comma splice: two independent clauses are joined only by a comma",
                vec![";".to_string(), ".".to_string()],
            ));
        }
        previous_independent = independent;
        clause_start = (comma + 1).min(text.len());
    }
    issues
}

/// Rough test for a clause that could stand alone as a sentence.
fn is_independent_clause(clause: &str) -> bool {
    let words: Vec<String> = text::words(clause);
    if words.len() < 3 || words.first().is_some_and(|w| CONJUNCTIONS.contains(&w.as_str())) {
        return false;
    }
    let subject = words.iter().position(|w| SUBJECT_WORDS.contains(w.as_str()));
    let verb = words.iter().rposition(|w| FINITE_VERBS.contains(w.as_str()));
    matches!((subject, verb), (Some(s), Some(v)) if s < v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Vec<GrammarIssue> {
        BuiltinChecker::new().check(text).unwrap()
    }

    fn rules(issues: &[GrammarIssue]) -> Vec<&str> {
        issues.iter().filter_map(|i| i.rule_id.as_deref()).collect()
    }

    #[test]
    fn clean_sentence_has_no_issues() {
        assert!(check("The cat sat on the mat.").is_empty());
        assert!(check("").is_empty());
    }

    #[test]
    fn detects_pronoun_disagreement_with_fix() {
        let issues = check("He are going to the store.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("SUBJECT_VERB_AGREEMENT"))
            .expect("should detect subject-verb disagreement");
        assert_eq!(issue.replacements, vec!["He is"]);
        assert_eq!(issue.offset, 0);
        assert_eq!(issue.length, 6);
        assert_eq!(issue.category, "GRAMMAR");
        assert_eq!(issue.context, "He are going to the store.");
    }

    #[test]
    fn plural_pronoun_with_singular_verb() {
        let issues = check("They was late again.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("SUBJECT_VERB_AGREEMENT"))
            .expect("should detect plural subject with singular verb");
        assert_eq!(issue.replacements, vec!["They were"]);
    }

    #[test]
    fn plural_noun_with_plural_verb_is_fine() {
        let issues = check("The dogs are barking loudly.");
        assert!(!rules(&issues).contains(&"NOUN_VERB_AGREEMENT"));
    }

    #[test]
    fn singular_noun_with_plural_verb_is_flagged() {
        let issues = check("The report are finished.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("NOUN_VERB_AGREEMENT"))
            .expect("should flag noun-verb disagreement");
        assert_eq!(issue.replacements, vec!["is"]);
    }

    #[test]
    fn detects_double_negative() {
        let issues = check("She didn't do nothing wrong.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("DOUBLE_NEGATIVE"))
            .expect("should detect double negative");
        assert_eq!(issue.replacements, vec!["didn't do anything"]);
    }

    #[test]
    fn detects_multiple_spaces_with_offset() {
        let issues = check("There are  two spaces here.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("WHITESPACE_RULE"))
            .expect("should detect repeated whitespace");
        assert_eq!(issue.offset, 9);
        assert_eq!(issue.length, 2);
        assert_eq!(issue.replacements, vec![" "]);
        assert_eq!(issue.category, "TYPOGRAPHY");
    }

    #[test]
    fn detects_repeated_word() {
        let issues = check("I saw the the movie.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("ENGLISH_WORD_REPEAT_RULE"))
            .expect("should detect repeated word");
        assert_eq!(issue.offset, 6);
        assert_eq!(issue.length, 7);
        assert_eq!(issue.replacements, vec!["the"]);
    }

    #[test]
    fn leading_quote_and_dash_stay_inside_the_token() {
        for text in ["hello '-a", "a '.a", "a '-é", "'-é x", "\"'.net\" is here."] {
            check(text);
        }
        assert_eq!(word_ranges("hello '-a"), vec![(0, 5, "hello"), (8, 9, "a")]);
        assert_eq!(word_ranges("don't'"), vec![(0, 5, "don't")]);
    }

    #[test]
    fn repeated_multibyte_word_after_punctuation() {
        let issues = check("'-é é");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("ENGLISH_WORD_REPEAT_RULE"))
            .expect("should detect repeated word");
        assert_eq!(issue.offset, 2);
        assert_eq!(issue.length, 3);
        assert_eq!(issue.replacements, vec!["é"]);
    }

    #[test]
    fn repeated_word_across_punctuation_is_fine() {
        let issues = check("It was late, late at night.");
        assert!(!rules(&issues).contains(&"ENGLISH_WORD_REPEAT_RULE"));
    }

    #[test]
    fn detects_missing_punctuation() {
        let issues = check("This sentence has no ending");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("PUNCTUATION_PARAGRAPH_END"))
            .expect("should detect missing punctuation");
        assert_eq!(issue.replacements, vec!["ending."]);
        assert_eq!(issue.category, "PUNCTUATION");
    }

    #[test]
    fn quoted_ending_counts_as_punctuated() {
        let issues = check("He said \"stop.\"");
        assert!(!rules(&issues).contains(&"PUNCTUATION_PARAGRAPH_END"));
    }

    #[test]
    fn detects_comma_splice() {
        let issues = check("I went to the store, it was closed.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("COMMA_SPLICE"))
            .expect("should detect comma splice");
        assert_eq!(issue.offset, 19);
        assert_eq!(issue.length, 1);
        assert_eq!(issue.replacements, vec![";", "."]);
    }

    #[test]
    fn conjunction_after_comma_is_not_a_splice() {
        let issues = check("I went to the store, and it was closed.");
        assert!(!rules(&issues).contains(&"COMMA_SPLICE"));
    }

    #[test]
    fn offsets_account_for_earlier_sentences() {
        let issues = check("All good here. He are late.");
        let issue = issues
            .iter()
            .find(|i| i.rule_id.as_deref() == Some("SUBJECT_VERB_AGREEMENT"))
            .expect("should detect disagreement in second sentence");
        assert_eq!(issue.offset, 15);
        assert_eq!(issue.context, "He are late.");
    }

    #[test]
    fn issues_come_back_in_document_order() {
        let issues = check("The the cat  sat. They was here");
        let offsets: Vec<usize> = issues.iter().map(|i| i.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
        assert!(issues.len() >= 4);
    }
}
