// Error types for the preference store.
// Covers date parsing, download failures, and persistence errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("Permission denied for download destination {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Download failed: {0}")]
    UnexpectedDownloadFailure(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl PrefsError {
    /// Whether this error should trigger the staged-download fallback.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            PrefsError::PermissionDenied(_) => true,
            PrefsError::Io(e) => is_refusal(e.kind()),
            _ => false,
        }
    }
}

/// IO error kinds meaning the destination cannot be written to.
pub fn is_refusal(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ReadOnlyFilesystem
    )
}

pub type Result<T> = std::result::Result<T, PrefsError>;
