//! Core library for textlens.
//!
//! Text statistics, word frequency, grammar checking and sentiment scoring
//! for the `textlens` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`analyzer`] - [`TextAnalyzer`] and [`Statistics`]
//! - [`frequency`] - Word-frequency tally
//! - [`grammar`] - Grammar services and issue formatting
//! - [`sentiment`] - Language analyzers (sentence count and polarity)
//! - [`session`] - One analysis pass producing a [`Report`]
//! - [`text`] - Tokenizing and sentence segmentation
//! - [`tips`] - Static writing tips
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use textlens_core::{ConfigLoader, Session};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let session = Session::from_config(&config).expect("valid config");
//! if let Some(report) = session.submit("The cat sat on the the mat.").unwrap() {
//!     println!("{} words, {} issues", report.statistics.word_count, report.issues.len());
//! }
//! ```
#![deny(unsafe_code)]

pub mod abbreviations;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod frequency;
pub mod grammar;
pub mod sentiment;
pub mod session;
pub mod text;
pub mod tips;

pub use analyzer::{Statistics, TextAnalyzer};
pub use config::{
    Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, GrammarBackend, GrammarConfig,
    LogLevel,
};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, ServiceError, ServiceResult,
};
pub use frequency::WordFrequencyEntry;
pub use grammar::{GrammarIssue, GrammarService};
pub use sentiment::{LanguageAnalysis, LanguageAnalyzer, LexiconAnalyzer, SentimentLabel};
pub use session::{Report, Session};
