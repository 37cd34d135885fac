//! Stats command.

use anyhow::Context;
use clap::Args;
use textlens_core::TextAnalyzer;
use tracing::instrument;

use super::InputArgs;
use crate::render;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Print word, character and sentence counts with sentiment.
#[instrument(name = "cmd_stats", skip_all, fields(input = %args.input.label()))]
pub fn cmd_stats(args: StatsArgs, global_json: bool, max_input: Option<usize>) -> anyhow::Result<()> {
    let text = args.input.read(max_input)?;
    if text.trim().is_empty() {
        if global_json {
            println!("null");
        } else {
            println!("Nothing to analyze: the input is empty.");
        }
        return Ok(());
    }

    let stats = TextAnalyzer::default()
        .analyze(&text)
        .with_context(|| format!("failed to analyze {}", args.input.label()))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render::metrics(&stats));
    }
    Ok(())
}
