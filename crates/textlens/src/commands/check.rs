//! Check command: the full report.

use anyhow::Context;
use clap::Args;
use textlens_core::Config;
use tracing::{debug, instrument};

use super::{GrammarOverrides, InputArgs, build_session};
use crate::render;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of words in the frequency chart (overrides config)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    #[command(flatten)]
    pub grammar: GrammarOverrides,
}

/// Analyze text and print statistics, grammar issues and word frequency.
#[instrument(name = "cmd_check", skip_all, fields(input = %args.input.label()))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(top = ?args.top, grammar = ?args.grammar.grammar, "executing check command");

    let text = args.input.read(max_input)?;
    let session = build_session(config, &args.grammar, args.top)?;

    let spinner = render::spinner(&format!("Checking with {}...", session.grammar().name()));
    let result = session.submit(&text);
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("failed to analyze {}", args.input.label()))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        Some(report) => print!("{}", render::report(&report)),
        None => println!("Nothing to analyze: the input is empty."),
    }
    Ok(())
}
