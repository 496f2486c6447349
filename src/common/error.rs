//! Unified error type for package generation.
//!
//! Every variant is a programmer or data error. Nothing here is transient and
//! nothing is retried: any error aborts the current generation run before the
//! container sink sees a single byte.
use thiserror::Error;

/// Main error type for deckpack operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API misuse, e.g. calling a step out of order or interning into a closed registry
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Malformed relationship type or target
    #[error("Invalid relationship target: {0}")]
    InvalidTarget(String),

    /// A resource payload could not be located or read at registration time
    #[error("Unreadable resource '{key}': {reason}")]
    UnreadableResource { key: String, reason: String },

    /// Two different content types claimed for the same extension or part name
    #[error("Content type conflict for '{key}': already '{existing}', requested '{requested}'")]
    ContentTypeConflict {
        key: String,
        existing: String,
        requested: String,
    },

    /// The assembler already handed its parts to the sink
    #[error("Package already sealed")]
    AlreadySealed,

    /// Malformed part name
    #[error("Invalid part name: {0}")]
    InvalidPartName(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Markup rendering error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid assembler options
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for deckpack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}
