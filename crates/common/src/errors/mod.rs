//! Error types for the PaperScope crates
//!
//! The analysis subsystem is deliberately tolerant: malformed records and
//! unresolvable citations are skipped with a warning rather than surfaced as
//! errors. The variants below cover the failures that remain.

use thiserror::Error;

/// Result type alias using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Analysis error types
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Corpus is empty: no usable paper records after normalization")]
    EmptyCorpus,

    #[error("Network not built: {kind}")]
    NetworkNotBuilt { kind: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AnalysisError {
    fn from(err: config::ConfigError) -> Self {
        AnalysisError::Configuration {
            message: err.to_string(),
        }
    }
}
