//! Terminal rendering for reports.
//!
//! Every function returns a `String` so commands decide where it goes.
//! Styling is applied only when stdout supports color (or `--color always`
//! forced it).

use std::fmt::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use textlens_core::grammar::{self, GrammarIssue};
use textlens_core::tips::WRITING_TIPS;
use textlens_core::{Report, SentimentLabel, Statistics, WordFrequencyEntry};

/// Widest bar in the frequency chart, in cells.
const BAR_WIDTH: usize = 40;

fn heading(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}

fn label(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed())
        .to_string()
}

fn sentiment(value: SentimentLabel) -> String {
    let text = value.as_str();
    match value {
        SentimentLabel::Positive => text
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        SentimentLabel::Negative => text
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
        SentimentLabel::Neutral => text.to_string(),
    }
}

/// The four summary metrics.
pub fn metrics(stats: &Statistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Text Statistics"));
    let _ = writeln!(out, "  {}       {}", label("Word Count:"), stats.word_count);
    let _ = writeln!(out, "  {}  {}", label("Character Count:"), stats.char_count);
    let _ = writeln!(out, "  {}   {}", label("Sentence Count:"), stats.sentence_count);
    let _ = writeln!(
        out,
        "  {}        {} ({:+.2})",
        label("Sentiment:"),
        sentiment(stats.sentiment_label),
        stats.sentiment_polarity
    );
    out
}

/// Numbered grammar issues followed by the summary line.
pub fn issues(issues: &[GrammarIssue]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Grammar Issues Found"));

    if issues.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            "No grammar issues found!".if_supports_color(Stream::Stdout, |t| t.green())
        );
        return out;
    }

    for (i, issue) in issues.iter().enumerate() {
        let title = grammar::issue_title(i + 1, issue);
        let _ = writeln!(
            out,
            "{}",
            title.if_supports_color(Stream::Stdout, |t| t.yellow())
        );
        let _ = writeln!(out, "  {} {}", label("Context:"), issue.context);
        let _ = writeln!(out, "  {} {}", label("Category:"), issue.category);
        let _ = writeln!(out, "  {}", label("Suggested Corrections:"));
        for (j, suggestion) in grammar::displayed_suggestions(issue).iter().enumerate() {
            let _ = writeln!(out, "    {}. {suggestion}", j + 1);
        }
    }
    let _ = writeln!(
        out,
        "{}",
        format!("Found {} potential issues in your text.", issues.len())
            .if_supports_color(Stream::Stdout, |t| t.cyan())
    );
    out
}

/// Horizontal bar chart of word counts.
pub fn frequency_chart(entries: &[WordFrequencyEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Word Frequency Analysis"));

    let Some(max) = entries.iter().map(|e| e.count).max() else {
        let _ = writeln!(out, "  {}", label("(no words)"));
        return out;
    };
    let width = entries
        .iter()
        .map(|e| e.word.chars().count())
        .max()
        .unwrap_or(0);

    for entry in entries {
        let cells = (entry.count * BAR_WIDTH / max).max(1);
        let bar = "█".repeat(cells);
        let pad = width - entry.word.chars().count();
        let _ = writeln!(
            out,
            "  {}{} {} {}",
            entry.word,
            " ".repeat(pad),
            bar.if_supports_color(Stream::Stdout, |t| t.blue()),
            entry.count
        );
    }
    out
}

/// The writing tips panel.
pub fn tips() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Tips for Better Writing"));
    for (i, tip) in WRITING_TIPS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}: {}", i + 1, heading(tip.title), tip.detail);
    }
    out
}

/// A full report: metrics, issues, then the frequency chart.
pub fn report(report: &Report) -> String {
    [
        metrics(&report.statistics),
        issues(&report.issues),
        frequency_chart(&report.frequencies),
    ]
    .join("\n")
}

/// Spinner on stderr while a slow call runs. Hidden when stderr is not a
/// terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
