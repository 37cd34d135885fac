//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use textlens_core::{Config, GrammarBackend, GrammarConfig, Session, TextAnalyzer};

pub mod check;
pub mod frequency;
pub mod grammar;
pub mod info;
pub mod interactive;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod stats;
pub mod tips;

/// Where a command reads its text from.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// File to analyze (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,
}

impl InputArgs {
    /// Read the input, enforcing `max_bytes` when set.
    pub fn read(&self, max_bytes: Option<usize>) -> anyhow::Result<String> {
        match self.file.as_deref() {
            Some(path) if path.as_str() != "-" => read_input_file(path, max_bytes),
            _ => read_stdin(max_bytes),
        }
    }

    /// Display name for logs and errors.
    pub fn label(&self) -> &str {
        match self.file.as_deref() {
            Some(path) if path.as_str() != "-" => path.as_str(),
            _ => "<stdin>",
        }
    }
}

/// Command-line overrides for the grammar service.
#[derive(Args, Debug, Default, Clone)]
pub struct GrammarOverrides {
    /// Grammar backend (overrides config)
    #[arg(long, value_enum)]
    pub grammar: Option<GrammarBackend>,

    /// LanguageTool server URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,
}

impl GrammarOverrides {
    /// `base` with these overrides applied.
    pub fn apply(&self, base: &GrammarConfig) -> GrammarConfig {
        let mut config = base.clone();
        if let Some(backend) = self.grammar {
            config.backend = backend;
        }
        if let Some(ref url) = self.server_url {
            config.server_url.clone_from(url);
        }
        config
    }
}

/// Build a session from configuration plus command-line overrides.
pub fn build_session(
    config: &Config,
    overrides: &GrammarOverrides,
    top: Option<usize>,
) -> anyhow::Result<Session> {
    let grammar_config = overrides.apply(&config.grammar);
    tracing::debug!(backend = %grammar_config.backend, "building session");
    Session::new(
        textlens_core::grammar::service_from_config(&grammar_config),
        TextAnalyzer::default(),
        top.unwrap_or(config.top_words),
    )
    .context("invalid session settings")
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Size is checked from metadata before the file is read.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Read stdin, stopping one byte past `max_bytes` to detect oversize input.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    read_limited(std::io::stdin().lock(), max_bytes)
}

fn read_limited(reader: impl Read, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    match max_bytes {
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader
                .take(limit)
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            if bytes.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes).context("failed to read stdin")?;
        }
    }
    String::from_utf8(bytes).context("stdin is not valid UTF-8")
}
