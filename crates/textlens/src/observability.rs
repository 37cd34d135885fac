//! Logging setup.
//!
//! Human-readable events go to stderr. When a log location can be found,
//! events are also written as JSON lines to a file through a non-blocking
//! writer. Log location, highest precedence first:
//!
//! 1. `TEXTLENS_LOG_PATH` (exact file, never rotated)
//! 2. `TEXTLENS_LOG_DIR` (daily rotated `textlens.jsonl.<date>`)
//! 3. `log_dir` from configuration
//! 4. The platform data directory (`~/.local/share/textlens/logs` on Linux)

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "TEXTLENS_LOG_PATH";
const LOG_DIR_ENV: &str = "TEXTLENS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "textlens.jsonl";

/// Where file logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single file at this exact path.
    File(PathBuf),
    /// Daily rotated files in this directory.
    Directory(PathBuf),
}

/// Resolved logging settings.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File log destination, if any.
    pub target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolve the log target from the environment, falling back to the
    /// configured directory and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            textlens_core::config::user_data_dir().map(|dir| dir.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Self {
        let target = env_path
            .filter(|p| !p.as_os_str().is_empty())
            .map(LogTarget::File)
            .or_else(|| {
                env_dir
                    .filter(|p| !p.as_os_str().is_empty())
                    .or(config_dir)
                    .or(platform_dir)
                    .map(LogTarget::Directory)
            });
        Self { target }
    }
}

/// Keeps the file writer flushing until dropped. Hold it for the life of
/// the program.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set and valid; otherwise `-q` selects `error`, `-v`
/// selects `debug`, `-vv` and beyond select `trace`, and with neither flag
/// the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(cli_level(quiet, verbose, config_level))
}

fn cli_level(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber.
///
/// A log location that cannot be created disables file logging with a
/// warning instead of failing the command.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let mut file_error = None;
    let (file_layer, guard) = match config.target.as_ref().map(open_appender) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        Some(Err(err)) => {
            file_error = Some(err);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(err) = file_error {
        tracing::warn!(error = %err, "file logging disabled");
    }
    Ok(ObservabilityGuard { _file: guard })
}

fn open_appender(target: &LogTarget) -> anyhow::Result<tracing_appender::rolling::RollingFileAppender> {
    match target {
        LogTarget::Directory(dir) => {
            create_dir(dir)?;
            Ok(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
        LogTarget::File(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            create_dir(dir)?;
            Ok(tracing_appender::rolling::never(dir, name))
        }
    }
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Option<PathBuf> {
        Some(PathBuf::from(s))
    }

    #[test]
    fn explicit_path_wins() {
        let config = ObservabilityConfig::resolve(p("/tmp/t.log"), p("/env"), p("/cfg"), p("/data"));
        assert_eq!(config.target, Some(LogTarget::File(PathBuf::from("/tmp/t.log"))));
    }

    #[test]
    fn directories_fall_back_in_order() {
        let env = ObservabilityConfig::resolve(None, p("/env"), p("/cfg"), p("/data"));
        assert_eq!(env.target, Some(LogTarget::Directory(PathBuf::from("/env"))));

        let cfg = ObservabilityConfig::resolve(None, None, p("/cfg"), p("/data"));
        assert_eq!(cfg.target, Some(LogTarget::Directory(PathBuf::from("/cfg"))));

        let data = ObservabilityConfig::resolve(None, None, None, p("/data"));
        assert_eq!(data.target, Some(LogTarget::Directory(PathBuf::from("/data"))));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = ObservabilityConfig::resolve(p(""), p(""), None, None);
        assert_eq!(config.target, None);
    }

    #[test]
    fn flags_pick_level() {
        assert_eq!(cli_level(true, 3, "info"), "error");
        assert_eq!(cli_level(false, 0, "warn"), "warn");
        assert_eq!(cli_level(false, 1, "info"), "debug");
        assert_eq!(cli_level(false, 4, "info"), "trace");
    }
}
