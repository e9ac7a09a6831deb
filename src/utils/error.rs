//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that abort the conversion loop
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported event schema: '{0}' matches no known category")]
    UnknownCategory(String),

    #[error("Unknown {category} event: '{name}'")]
    UnknownSubKind { category: &'static str, name: String },

    #[error("Event '{event}' is missing required field '{field}'")]
    MissingField { event: String, field: &'static str },

    #[error("Event '{event}' has a non-integer '{field}' field")]
    InvalidField { event: String, field: &'static str },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors reported by the raw-event source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The stream ended in the middle of a record
    #[error("Trace does not terminate cleanly (line {line})")]
    Truncated { line: usize },
}

impl SourceError {
    /// Whether the run may finish normally after this error
    ///
    /// **Public** - consulted by the session when the source fails
    pub fn is_clean_end(&self) -> bool {
        matches!(self, SourceError::Truncated { .. })
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
