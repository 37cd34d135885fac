//! Grammar command: issues only.

use anyhow::Context;
use clap::Args;
use textlens_core::Config;
use tracing::{debug, instrument};

use super::{GrammarOverrides, InputArgs};
use crate::render;

/// Arguments for the `grammar` subcommand.
#[derive(Args, Debug, Default)]
pub struct GrammarArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub grammar: GrammarOverrides,
}

/// Check grammar and print each issue with suggestions.
#[instrument(name = "cmd_grammar", skip_all, fields(input = %args.input.label()))]
pub fn cmd_grammar(
    args: GrammarArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let grammar_config = args.grammar.apply(&config.grammar);
    debug!(backend = %grammar_config.backend, "executing grammar command");

    let text = args.input.read(max_input)?;
    if text.trim().is_empty() {
        if global_json {
            println!("[]");
        } else {
            println!("Nothing to check: the input is empty.");
        }
        return Ok(());
    }

    let service = textlens_core::grammar::service_from_config(&grammar_config);
    let spinner = render::spinner(&format!("Checking with {}...", service.name()));
    let result = service.check(&text);
    spinner.finish_and_clear();
    let issues =
        result.with_context(|| format!("failed to check grammar of {}", args.input.label()))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else {
        print!("{}", render::issues(&issues));
    }
    Ok(())
}
