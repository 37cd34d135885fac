//! Configuration loading and discovery.
//!
//! Sources are merged with figment, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. User config: `~/.config/textlens/config.<ext>`
//! 3. Project config: `.textlens.<ext>` then `textlens.<ext>`, taken from the
//!    closest directory (walking up from the search root) that has any
//! 4. Explicit files added with [`ConfigLoader::with_file`]
//! 5. `TEXTLENS_*` environment variables; `__` separates nested keys, so
//!    `TEXTLENS_GRAMMAR__BACKEND=language-tool` sets `grammar.backend`
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use textlens_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("top words: {} (from {:?})", config.top_words, sources.primary_file());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::frequency::DEFAULT_TOP_N;
use crate::grammar::languagetool::{DEFAULT_LANGUAGE, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};

/// Default input size limit (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Which grammar service checks submitted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum GrammarBackend {
    /// Offline rule-based checker.
    #[default]
    Builtin,
    /// A LanguageTool HTTP server.
    LanguageTool,
}

impl GrammarBackend {
    /// The backend name as written in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::LanguageTool => "language-tool",
        }
    }
}

impl std::fmt::Display for GrammarBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar service settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrammarConfig {
    /// Backend to use.
    pub backend: GrammarBackend,
    /// LanguageTool server base URL.
    pub server_url: String,
    /// Language code sent to LanguageTool.
    pub language: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            backend: GrammarBackend::default(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// The configuration for textlens.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Number of words shown in the frequency chart.
    pub top_words: usize,
    /// Maximum input size in bytes. Omit for the 5 MiB default.
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check entirely.
    pub disable_input_limit: bool,
    /// Grammar service settings.
    pub grammar: GrammarConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            top_words: DEFAULT_TOP_N,
            max_input_bytes: None,
            disable_input_limit: false,
            grammar: GrammarConfig::default(),
        }
    }
}

impl Config {
    /// Effective input size limit, or `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low to high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed explicitly (e.g. `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "textlens";

const ENV_PREFIX: &str = "TEXTLENS_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Include or skip `~/.config/textlens/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add a config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge all sources into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialize`] if a source cannot be parsed or a
    /// value has the wrong type.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // TEXTLENS_TOP_WORDS=5, TEXTLENS_GRAMMAR__SERVER_URL=http://..., etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            grammar = %config.grammar.backend,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when no source file was found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Config files from the closest directory that has any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let dotfiles = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!(".{APP_NAME}.{ext}")));
            let regular = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{APP_NAME}.{ext}")));
            let found: Vec<Utf8PathBuf> = dotfiles.chain(regular).filter(|p| p.is_file()).collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker counts.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// User config directory (`~/.config/textlens/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// User data directory (`~/.local/share/textlens/` on Linux).
///
/// Log files go here when no log directory is configured.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that touch process environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn load_file(contents: &str, name: &str) -> Config {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(name);
        fs::write(&path, contents).unwrap();
        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load()
            .unwrap();
        config
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.top_words, 10);
        assert_eq!(config.grammar.backend, GrammarBackend::Builtin);
        assert_eq!(config.grammar.server_url, "http://localhost:8081");
        assert_eq!(config.grammar.language, "en-US");
        assert_eq!(config.grammar.timeout_secs, 30);
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn loader_without_files_yields_defaults() {
        let _lock = env_lock();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.top_words, 10);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn toml_sets_nested_grammar_section() {
        let config = load_file(
            "top_words = 5\n\n[grammar]\nbackend = \"language-tool\"\nserver_url = \"http://lt:8010\"\n",
            "config.toml",
        );
        assert_eq!(config.top_words, 5);
        assert_eq!(config.grammar.backend, GrammarBackend::LanguageTool);
        assert_eq!(config.grammar.server_url, "http://lt:8010");
        // Unset nested fields keep their defaults.
        assert_eq!(config.grammar.language, "en-US");
    }

    #[test]
    fn yaml_and_json_are_supported() {
        let yaml = load_file("log_level: debug\ngrammar:\n  language: en-GB\n", "c.yaml");
        assert_eq!(yaml.log_level, LogLevel::Debug);
        assert_eq!(yaml.grammar.language, "en-GB");

        let json = load_file(r#"{"log_level": "warn", "top_words": 3}"#, "c.json");
        assert_eq!(json.log_level, LogLevel::Warn);
        assert_eq!(json.top_words, 3);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, r#"log_level = "warn""#).unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&base))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.primary_file(), Some(utf8(&over).as_path()));
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("src").join("deep");
        fs::create_dir_all(&deep).unwrap();
        fs::write(project.join(".textlens.toml"), "top_words = 7").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(&deep))
            .load()
            .unwrap();

        assert_eq!(config.top_words, 7);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".textlens.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(&work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn regular_file_beats_dotfile() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".textlens.toml"), r#"log_level = "debug""#).unwrap();
        fs::write(tmp.path().join("textlens.toml"), r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path()))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join("textlens.toml"), "top_words = 20").unwrap();
        fs::write(child.join(".textlens.yaml"), "log_level: error\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(&child))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.top_words, 10);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn explicit_file_overrides_project_config() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".textlens.toml"), r#"log_level = "warn""#).unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path()))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 1);
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn invalid_value_is_deserialize_error() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[grammar]\nbackend = \"gpt\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn load_or_error_fails_when_no_config() {
        let _lock = env_lock();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn disabled_limit_ignores_max_bytes() {
        let config = load_file("max_input_bytes = 1024\ndisable_input_limit = true\n", "c.toml");
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);

        let config = load_file("max_input_bytes = 1024\n", "c.toml");
        assert_eq!(config.input_limit(), Some(1024));
    }

    #[test]
    fn deserializes_from_yaml_directly() {
        let config: Config = serde_yaml::from_str("grammar:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(config.grammar.timeout_secs, 5);
        assert_eq!(config.top_words, 10);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_vars_override_files_and_reach_nested_keys() {
        let _lock = env_lock();

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "top_words = 4\n").unwrap();

        // SAFETY: the mutex serializes environment access across tests.
        unsafe {
            std::env::set_var("TEXTLENS_TOP_WORDS", "12");
            std::env::set_var("TEXTLENS_GRAMMAR__BACKEND", "language-tool");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();

        // SAFETY: as above.
        unsafe {
            std::env::remove_var("TEXTLENS_TOP_WORDS");
            std::env::remove_var("TEXTLENS_GRAMMAR__BACKEND");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(config.top_words, 12);
        assert_eq!(config.grammar.backend, GrammarBackend::LanguageTool);
    }

    #[test]
    fn user_config_dir_names_the_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("textlens"));
        }
    }

    #[test]
    fn backend_names() {
        assert_eq!(GrammarBackend::Builtin.to_string(), "builtin");
        assert_eq!(GrammarBackend::LanguageTool.as_str(), "language-tool");
    }
}
