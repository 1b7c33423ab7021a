//! Runtime error types for the cutscene authoring pipeline.
//!
//! These errors cover genuinely fallible operations: reading a document file
//! from disk and parsing its JSON. Schema rule violations are NOT errors —
//! they are `Diagnostic` values accumulated by the validator and returned to
//! the caller as data.

use thiserror::Error;

/// The unified error type for the cutscene authoring crates.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// The document file could not be read from disk.
    #[error("failed to read cutscene document '{path}': {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document bytes are not valid JSON.
    ///
    /// Note this only covers malformed JSON syntax. A well-formed document
    /// with missing or wrongly-typed fields parses fine — checking those
    /// fields is the validator's job, not the loader's.
    #[error("failed to parse cutscene document: {reason}")]
    DocumentParse { reason: String },
}

/// Convenience alias used throughout the cutscene crates.
pub type AuthoringResult<T> = Result<T, AuthoringError>;
