//! textlens CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use textlens::{Cli, Commands, commands};
use textlens_core::config::ConfigLoader;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        config_file = ?config_sources.primary_file(),
        "CLI initialized"
    );

    let max_input = config.input_limit();

    let result = match command {
        Commands::Check(args) => commands::check::cmd_check(args, cli.json, &config, max_input),
        Commands::Stats(args) => commands::stats::cmd_stats(args, cli.json, max_input),
        Commands::Frequency(args) => {
            commands::frequency::cmd_frequency(args, cli.json, config.top_words, max_input)
        }
        Commands::Grammar(args) => {
            commands::grammar::cmd_grammar(args, cli.json, &config, max_input)
        }
        Commands::Interactive(args) => {
            commands::interactive::cmd_interactive(args, cli.json, &config, max_input)
        }
        Commands::Tips(args) => commands::tips::cmd_tips(args, cli.json),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => serve(args, &config, max_input),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Run the MCP server.
///
/// The session is created and released outside the async runtime because a
/// grammar service may own a blocking HTTP client.
#[cfg(feature = "mcp")]
fn serve(
    args: commands::serve::ServeArgs,
    config: &textlens_core::Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let session = std::sync::Arc::new(
        textlens_core::Session::from_config(config).context("invalid session settings")?,
    );
    let rt =
        tokio::runtime::Runtime::new().context("failed to create async runtime for MCP server")?;
    let result = rt.block_on(commands::serve::cmd_serve(
        args,
        std::sync::Arc::clone(&session),
        max_input,
    ));
    drop(rt);
    result
}
