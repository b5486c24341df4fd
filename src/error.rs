//! Error taxonomy for a pipeline run.
//!
//! Every stage either succeeds or fails with one of four kinds. The kind is
//! never rewritten on the way up: a source failure reaches the caller as a
//! source failure, a write failure as a write failure.

use std::path::PathBuf;

use thiserror::Error;

/// Tag of a [`PipelineError`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input string does not reference a video. User-correctable.
    InvalidReference,
    /// The API credential is missing or was rejected. Operator-correctable.
    Authentication,
    /// The remote comment API could not deliver (network, quota, timeout).
    SourceUnavailable,
    /// An artifact could not be persisted.
    Write,
}

/// A failed pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid YouTube URL {url:?}. Please enter a correct link.")]
    InvalidReference { url: String },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("comment source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidReference { .. } => ErrorKind::InvalidReference,
            PipelineError::Authentication(_) => ErrorKind::Authentication,
            PipelineError::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            PipelineError::Write { .. } => ErrorKind::Write,
        }
    }

    /// Build a [`PipelineError::Write`] from any displayable failure.
    pub fn write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        PipelineError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = PipelineError::InvalidReference {
            url: "nope".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        assert_eq!(
            PipelineError::Authentication("x".into()).kind(),
            ErrorKind::Authentication
        );
        assert_eq!(
            PipelineError::SourceUnavailable("x".into()).kind(),
            ErrorKind::SourceUnavailable
        );
        assert_eq!(
            PipelineError::write("/tmp/a.csv", "disk full").kind(),
            ErrorKind::Write
        );
    }

    #[test]
    fn write_error_mentions_path() {
        let err = PipelineError::write("/out/comments.csv", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("/out/comments.csv"));
        assert!(msg.contains("permission denied"));
    }
}
