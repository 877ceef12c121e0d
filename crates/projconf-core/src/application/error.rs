//! Application layer errors.
//!
//! These errors represent failures at the ports (disk, network, bundled
//! resources). Registry and template errors are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while talking to the outside world.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Homepage download failed.
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// A bundled or configured resource file is missing.
    #[error("Resource not found: {name}")]
    ResourceMissing { name: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Run projconf from the project's scripts/ directory or pass --project-dir".into(),
            ],
            Self::FetchFailed { url, .. } => vec![
                format!("Check that {} is reachable", url),
                "Set md_description to skip the homepage download".into(),
            ],
            Self::ResourceMissing { name } => vec![
                format!("Add {} to the resource directory", name),
                "Or drop --resource-dir to use the built-in copy".into(),
            ],
            Self::LockPoisoned => vec!["Re-run the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::FetchFailed { .. } | Self::ResourceMissing { .. } => ErrorCategory::NotFound,
        }
    }
}
