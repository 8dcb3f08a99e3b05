//! Error types for layout reconstruction.
//!
//! The reconstruction core itself only ever fails with [`Error::MalformedInput`];
//! the remaining variants belong to the outer layers (configuration loading,
//! the command-line converter and the DOCX writer).

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page geometry the core cannot work with (non-positive or non-finite height)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A tuning parameter is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (extractor dumps, config files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while packaging a Word document
    #[error("DOCX error: {0}")]
    Docx(String),
}
