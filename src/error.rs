//! Error types for typedef checking

use std::path::PathBuf;

use thiserror::Error;

/// Result type for typedef operations
pub type Result<T> = std::result::Result<T, TypedefError>;

/// Fatal errors for a single (typedef, data) pair.
///
/// Shape disagreements between a document and its typedef are never
/// reported here; those are collected as findings.
#[derive(Error, Debug)]
pub enum TypedefError {
    #[error("Malformed typedef at '{location}': {reason}")]
    MalformedSchema { location: String, reason: String },

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Discovery failed: {0}")]
    Discovery(String),

    #[error("Invalid typedef path: {0}")]
    InvalidPath(String),
}

impl TypedefError {
    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from parsing one of the pair's documents
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedSchema { .. } | Self::MalformedJson(_))
    }
}
