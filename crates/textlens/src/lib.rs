//! Library interface for the `textlens` CLI.
//!
//! Exposes the argument parser, command implementations and report rendering
//! so they can be tested and reused. The entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`render`] - Terminal rendering of reports

pub mod commands;
pub mod render;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Set the global color mode. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                       Log filter (e.g., debug, textlens=trace)
    TEXTLENS_LOG_PATH              Explicit log file path
    TEXTLENS_LOG_DIR               Log directory
    TEXTLENS_TOP_WORDS             Words shown in the frequency chart
    TEXTLENS_GRAMMAR__BACKEND      Grammar backend (builtin, language-tool)
    TEXTLENS_GRAMMAR__SERVER_URL   LanguageTool server URL
";

/// Command-line interface definition for textlens.
#[derive(Parser)]
#[command(name = "textlens")]
#[command(
    about = "Grammar, sentiment, and word-frequency analysis for pasted text",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Full report: statistics, grammar issues, and word frequency
    Check(commands::check::CheckArgs),

    /// Word, character, and sentence counts with sentiment
    Stats(commands::stats::StatsArgs),

    /// Most frequent words
    Frequency(commands::frequency::FrequencyArgs),

    /// Grammar issues with suggested corrections
    Grammar(commands::grammar::GrammarArgs),

    /// Paste text repeatedly and get a report for each submission
    Interactive(commands::interactive::InteractiveArgs),

    /// Show writing tips
    Tips(commands::tips::TipsArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn check_accepts_grammar_overrides() {
        let cli = Cli::try_parse_from([
            "textlens",
            "check",
            "notes.txt",
            "--top",
            "3",
            "--grammar",
            "language-tool",
            "--server-url",
            "http://lt:8010",
        ])
        .unwrap();
        let Some(Commands::Check(args)) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.top, Some(3));
        assert_eq!(args.input.file.as_deref().map(|f| f.as_str()), Some("notes.txt"));
        assert_eq!(
            args.grammar.grammar,
            Some(textlens_core::GrammarBackend::LanguageTool)
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["textlens", "stats", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
