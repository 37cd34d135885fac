//! Tokenizing and sentence segmentation.
//!
//! A *token* is a maximal run of non-whitespace characters. Sentences are
//! found by scanning for terminal punctuation and rejecting boundaries that
//! belong to abbreviations, initials, decimals, ellipses, URLs, or email
//! addresses.

use std::sync::LazyLock;

use regex::Regex;

use crate::abbreviations::is_abbreviation;

/// Sentences shorter than this many bytes (after trimming) are dropped.
const MIN_SENTENCE_LEN: usize = 3;

static DECIMAL_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+$").expect("valid regex"));

static URL_OR_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://|www\.)\S+$|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.?[A-Za-z]*$")
        .expect("valid regex")
});

static INITIALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\.)+[A-Z]?$").expect("valid regex"));

/// A sentence and where it starts in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Trimmed sentence text.
    pub text: String,
    /// Offset of the first character, counted in `char`s from the start of
    /// the source text.
    pub start: usize,
}

/// Iterate over whitespace-delimited tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Number of whitespace-delimited tokens.
pub fn token_count(text: &str) -> usize {
    tokens(text).count()
}

/// Lowercased words with surrounding punctuation removed.
///
/// Apostrophes and hyphens inside a word are kept ("don't", "well-known").
pub fn words(text: &str) -> Vec<String> {
    tokens(text)
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Split text into sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    sentence_spans(text).into_iter().map(|s| s.text).collect()
}

/// Split text into sentences, keeping each sentence's starting offset.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn sentence_spans(text: &str) -> Vec<Sentence> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, &ch) in chars.iter().enumerate() {
        if matches!(ch, '.' | '!' | '?') && i >= start && ends_sentence(&chars, start, i) {
            let end = closing_run(&chars, i + 1);
            push_span(&mut spans, &chars, start, end);
            start = end;
        }
    }
    push_span(&mut spans, &chars, start, chars.len());

    spans
}

fn push_span(spans: &mut Vec<Sentence>, chars: &[char], from: usize, to: usize) {
    let slice = &chars[from..to];
    let leading = slice.iter().take_while(|c| c.is_whitespace()).count();
    let text: String = slice.iter().collect();
    let text = text.trim().to_string();
    if text.len() >= MIN_SENTENCE_LEN {
        spans.push(Sentence {
            text,
            start: from + leading,
        });
    }
}

/// Decide whether the terminator at `pos` closes the sentence that began at
/// `start`.
fn ends_sentence(chars: &[char], start: usize, pos: usize) -> bool {
    let after = closing_run(chars, pos + 1);
    let next = chars[after..].iter().position(|c| !c.is_whitespace());
    let Some(next) = next.map(|n| after + n) else {
        return true;
    };
    let next_char = chars[next];
    let adjacent = next == pos + 1;

    // Runs of terminators ("?!", "...") close on the last one.
    if adjacent && matches!(next_char, '.' | '!' | '?') {
        return false;
    }

    if chars[pos] != '.' {
        return match next_char {
            '"' | '\'' | '\u{201c}' => chars.get(next + 1).is_none_or(|c| c.is_uppercase()),
            c => !c.is_lowercase(),
        };
    }

    let word = word_before(chars, pos);
    let current: String = chars[start..=pos].iter().collect();

    if is_abbreviation(word.trim_end_matches('.')) || is_initial(&word) {
        return false;
    }
    if adjacent && next_char.is_ascii_digit() {
        return false;
    }
    if current.ends_with("...") {
        return false;
    }
    if DECIMAL_TAIL.is_match(current.trim_end_matches('.')) {
        return next_char.is_uppercase();
    }
    if adjacent && URL_OR_EMAIL.is_match(current.trim_end_matches('.')) {
        return false;
    }

    !next_char.is_lowercase()
}

/// Index just past any closing quotes or brackets starting at `from`.
fn closing_run(chars: &[char], from: usize) -> usize {
    let run = chars
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|c| matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}'))
        .count();
    from + run
}

/// The word (letters, digits, and inner periods) immediately before `pos`.
fn word_before(chars: &[char], pos: usize) -> String {
    let begin = chars[..pos]
        .iter()
        .rposition(|c| !(c.is_alphanumeric() || *c == '.'))
        .map_or(0, |i| i + 1);
    chars[begin..pos].iter().collect()
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    let single_letter = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_uppercase()
    );
    single_letter || INITIALS.is_match(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_count_ignores_whitespace_runs() {
        assert_eq!(token_count("  the   cat\tsat\n\non  the mat  "), 6);
        assert_eq!(token_count(""), 0);
        assert_eq!(token_count(" \n\t "), 0);
    }

    #[test]
    fn words_strip_punctuation_and_lowercase() {
        assert_eq!(
            words("Hello, world! Don't 'quote' -- well-known."),
            vec!["hello", "world", "don't", "quote", "well-known"]
        );
    }

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(sentences, vec!["This is a sentence.", "This is another sentence."]);
    }

    #[test]
    fn abbreviations_not_split() {
        let sentences = split_sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Dr. Smith"));
    }

    #[test]
    fn initials_not_split() {
        let sentences = split_sentences("J. K. Rowling wrote it. People loved it.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn decimal_numbers_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn urls_not_split() {
        let sentences = split_sentences("Visit www.example.com for details. Then log in.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("www.example.com"));
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn repeated_terminators_close_once() {
        let sentences = split_sentences("Really?! Yes. Wait... What happened?");
        assert_eq!(sentences, vec!["Really?!", "Yes.", "Wait... What happened?"]);
    }

    #[test]
    fn closing_quote_stays_with_its_sentence() {
        let sentences = split_sentences("He said \"stop.\" She left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "She left."]);
    }

    #[test]
    fn trailing_fragment_without_terminator_is_a_sentence() {
        let sentences = split_sentences("First one. second part has no end");
        assert_eq!(sentences, vec!["First one. second part has no end"]);
    }

    #[test]
    fn spans_record_char_offsets() {
        let spans = sentence_spans("Héllo there. Second one!");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].start, 13);
        assert_eq!(spans[1].text, "Second one!");
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}
