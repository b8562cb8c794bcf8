//! Error types for chunklens

use thiserror::Error;

use crate::config::ConfigRule;

/// Result type alias for chunklens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a document or configuring the chunker
///
/// None of these are fatal: the caller is expected to show the message and
/// fall back to an empty state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source document could not be read or parsed
    #[error("Error parsing document: {0}")]
    Extraction(String),

    /// No extractor handles this kind of document
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The configuration text is not well-formed JSON
    #[error("{0}")]
    ConfigParse(String),

    /// The configuration parsed but breaks one of the chunking rules
    #[error("{0}")]
    ConfigValidation(ConfigRule),
}

impl From<ConfigRule> for Error {
    fn from(rule: ConfigRule) -> Self {
        Error::ConfigValidation(rule)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}
