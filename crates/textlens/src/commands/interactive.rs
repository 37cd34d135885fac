//! Interactive command: paste text, get a report, repeat.
//!
//! Lines are collected until an empty line, then submitted. `:quit` or end
//! of input leaves the loop. A failed submission is reported and the loop
//! keeps going.

use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use textlens_core::{Config, Session};
use tracing::{debug, instrument, warn};

use super::{GrammarOverrides, build_session};
use crate::render;

const QUIT: &str = ":quit";

/// Arguments for the `interactive` subcommand.
#[derive(Args, Debug, Default)]
pub struct InteractiveArgs {
    /// Number of words in the frequency chart (overrides config)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Don't show the writing tips at startup
    #[arg(long)]
    pub no_tips: bool,

    #[command(flatten)]
    pub grammar: GrammarOverrides,
}

/// What one pass of the loop did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Submissions that produced a report.
    pub reports: usize,
    /// Submissions that failed.
    pub failures: usize,
}

/// Run the prompt loop on stdin and stdout.
#[instrument(name = "cmd_interactive", skip_all)]
pub fn cmd_interactive(
    args: InteractiveArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let session = build_session(config, &args.grammar, args.top)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !args.no_tips && !global_json {
        writeln!(out, "{}", render::tips())?;
    }

    let summary = run_loop(
        &session,
        std::io::stdin().lock(),
        &mut out,
        global_json,
        max_input,
    )?;
    debug!(reports = summary.reports, failures = summary.failures, "interactive session ended");
    Ok(())
}

/// Read submissions from `input` and write reports to `out` until `:quit`
/// or end of input.
pub fn run_loop(
    session: &Session,
    input: impl BufRead,
    out: &mut impl Write,
    json: bool,
    max_input: Option<usize>,
) -> anyhow::Result<LoopSummary> {
    let mut summary = LoopSummary::default();
    let mut buffer = String::new();
    // Set to the limit once the pending text has gone past it.
    let mut rejected: Option<usize> = None;
    let mut lines = input.lines();

    loop {
        if !json && buffer.is_empty() && rejected.is_none() {
            prompt(out)?;
        }
        let line = lines.next().transpose().context("failed to read input")?;

        let quit = match line.as_deref() {
            None => true,
            Some(l) if l.trim() == QUIT => true,
            Some("") => false,
            Some(_) if rejected.is_some() => continue,
            Some(l) => {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(l);
                if let Some(max) = max_input
                    && buffer.len() > max
                {
                    buffer.clear();
                    rejected = Some(max);
                }
                continue;
            }
        };

        if let Some(max) = rejected.take() {
            summary.failures += 1;
            warn!(limit = max, "submission too large");
            write_error(out, &format!("input too large: text exceeds {max} bytes"))?;
        } else if !buffer.is_empty() {
            submit(session, &buffer, out, json, &mut summary)?;
            buffer.clear();
        }
        if quit {
            break;
        }
    }

    Ok(summary)
}

fn prompt(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Enter your text (blank line to check, {QUIT} to exit):")
            .if_supports_color(Stream::Stdout, |t| t.bold())
    )?;
    out.flush()?;
    Ok(())
}

fn submit(
    session: &Session,
    text: &str,
    out: &mut impl Write,
    json: bool,
    summary: &mut LoopSummary,
) -> anyhow::Result<()> {
    match session.submit(text) {
        Ok(Some(report)) => {
            summary.reports += 1;
            if json {
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else {
                writeln!(out, "{}", render::report(&report))?;
            }
        }
        Ok(None) => {}
        Err(err) => {
            summary.failures += 1;
            warn!(error = %err, "submission failed");
            write_error(out, &err.to_string())?;
        }
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {message}",
        "Error:".if_supports_color(Stream::Stdout, |t| t.red())
    )?;
    Ok(())
}
