//! Error types for loading and parsing question banks
//!
//! Every variant is meant to be shown to the end user as-is. None of them are retried.

use std::path::PathBuf;
use thiserror::Error;

/// Error that can occur while turning a source file into questions
#[derive(Debug, Error)]
pub enum ParseError {
    /// File extension not recognized (or a legacy `.doc` file)
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Every candidate grammar produced zero valid questions
    #[error("no questions found in the source")]
    NoQuestionsFound,

    /// A table grammar recognized its layout but the table or answer key was invalid
    #[error("malformed table in question {question}: {reason}")]
    MalformedTable { question: usize, reason: String },

    /// The document could not be read or decoded
    #[error("failed to extract document content: {0}")]
    ExtractionFailure(String),

    /// A parsed question violates the model invariants
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// Configuration values that cannot be used (e.g. an invalid marker pattern)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn malformed(question: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedTable {
            question,
            reason: reason.into(),
        }
    }

    /// Whether the dispatcher should try the next grammar after this error
    pub fn is_fallthrough(&self) -> bool {
        matches!(self, ParseError::MalformedTable { .. })
    }
}
