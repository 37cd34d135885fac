//! Frequency command.

use anyhow::Context;
use clap::Args;
use textlens_core::frequency;
use tracing::{debug, instrument};

use super::InputArgs;
use crate::render;

/// Arguments for the `frequency` subcommand.
#[derive(Args, Debug, Default)]
pub struct FrequencyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of words to show (overrides config)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Print the most frequent words.
#[instrument(name = "cmd_frequency", skip_all, fields(input = %args.input.label()))]
pub fn cmd_frequency(
    args: FrequencyArgs,
    global_json: bool,
    config_top: usize,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let top_n = args.top.unwrap_or(config_top);
    debug!(top_n, "executing frequency command");

    let text = args.input.read(max_input)?;
    if text.trim().is_empty() {
        if global_json {
            println!("[]");
        } else {
            println!("Nothing to count: the input is empty.");
        }
        return Ok(());
    }

    let entries = frequency::word_frequency(&text, top_n)
        .with_context(|| format!("failed to count words in {}", args.input.label()))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render::frequency_chart(&entries));
    }
    Ok(())
}
