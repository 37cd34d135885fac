//! Error types for textlens-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by an external collaborator (grammar or language service).
///
/// These are recoverable: callers report them and keep running.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The HTTP client for a service could not be built.
    #[error("failed to initialize client: {0}")]
    ClientInit(String),

    /// The service could not be reached.
    #[error("{service} is unavailable: {source}")]
    Unavailable {
        /// Name of the service that failed.
        service: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status code.
    #[error("{service} returned HTTP {status}")]
    Status {
        /// Name of the service that failed.
        service: String,
        /// HTTP status code.
        status: u16,
    },

    /// The service response could not be decoded.
    #[error("{service} returned an unreadable response: {reason}")]
    Decode {
        /// Name of the service that failed.
        service: String,
        /// Decoder message.
        reason: String,
    },
}

/// Result type alias using [`ServiceError`].
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A caller-supplied argument is out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A collaborator service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
