//! Error types for bundle operations.

use crate::validate::ValidationReport;
use thiserror::Error;

/// Errors that can occur while assembling a bundle.
///
/// Schema violations are collected into a [`ValidationReport`] and surface
/// here only in aggregate. Every other variant aborts the run on first
/// occurrence.
#[derive(Debug, Error)]
pub enum BundleError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest failed schema validation.
    #[error("manifest has {} schema violation(s)", .0.error_count())]
    ValidationFailed(ValidationReport),

    /// A referenced file does not exist under the input root.
    #[error("referenced file not found: {0}")]
    ReferenceNotFound(String),

    /// A reference tried to leave the input root.
    #[error("reference escapes the input root: {0}")]
    PathTraversalRejected(String),

    /// A file references itself, directly or through other files.
    #[error("circular file reference: {}", .0.join(" -> "))]
    CircularReference(Vec<String>),

    /// A file that must be embedded as text is not valid UTF-8.
    #[error("referenced file is not valid UTF-8: {0}")]
    NotUtf8(String),

    /// The manifest guid cannot be used as an output file name.
    #[error("invalid guid for bundle file name: {0}")]
    InvalidGuid(String),

    /// The artifact body could not be decoded.
    #[error("invalid bundle artifact: {0}")]
    InvalidArtifact(String),
}
