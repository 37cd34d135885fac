//! Tips command.

use clap::Args;
use textlens_core::tips::WRITING_TIPS;

use crate::render;

/// Arguments for the `tips` subcommand.
#[derive(Args, Debug, Default)]
pub struct TipsArgs {}

/// Print the writing tips panel.
pub fn cmd_tips(_args: TipsArgs, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(WRITING_TIPS)?);
    } else {
        print!("{}", render::tips());
    }
    Ok(())
}
