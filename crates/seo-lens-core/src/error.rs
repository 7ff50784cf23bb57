//! Error types for seo-lens-core.

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

/// Errors that can occur during page analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The keyword input contained no usable keywords after trimming.
    #[error("no keywords provided")]
    NoKeywords,

    /// The input document is empty.
    #[error("no analyzable content in input")]
    EmptyInput,

    /// An unknown check name was requested.
    #[error("unknown check: {name}. Use: {available}")]
    UnknownCheck {
        /// The check name that was requested.
        name: String,
        /// Comma-separated list of available check names.
        available: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by an [`Advisor`](crate::advisor::Advisor) implementation.
///
/// These never abort an analysis; callers log them and carry on.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// The advisory service could not be reached or refused the request.
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    /// The advisory service answered with something unusable.
    #[error("invalid advisor response: {0}")]
    InvalidResponse(String),
}
