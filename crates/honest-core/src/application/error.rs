//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The downloaded repository has no registry manifest.
    #[error("templates.json not found in repository")]
    ManifestMissing,

    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Downloading the template repository failed.
    #[error("Failed to download templates: {reason}")]
    FetchFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Directory '{path}' already exists")]
    ProjectExists { path: PathBuf },

    /// Any fatal failure after the destination was claimed.
    #[error("Failed to create project from template '{template}': {reason}")]
    ScaffoldFailed { template: String, reason: String },

    /// An external command could not be run or exited non-zero.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestMissing => vec![
                "The template repository does not contain a templates.json".into(),
                "Check templates.repository / templates.reference in your config".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Run: honestjs list to see available templates".into(),
                "Or pick one with --template".into(),
            ],
            Self::FetchFailed { .. } => vec![
                "Make sure you have internet connection and the honestjs/templates repository is accessible".into(),
                "Or point templates.local_path at a local copy of the repository".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { .. } => vec!["Choose a different project name".into()],
            Self::ScaffoldFailed { .. } => vec![
                "The partially created project was removed".into(),
                "Run again with -v for details".into(),
            ],
            Self::CommandFailed { command, .. } => {
                vec![format!("Check that `{}` is installed and on your PATH", command)]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ManifestMissing => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FetchFailed { .. }
            | Self::FilesystemError { .. }
            | Self::ScaffoldFailed { .. }
            | Self::CommandFailed { .. } => ErrorCategory::Internal,
        }
    }
}
