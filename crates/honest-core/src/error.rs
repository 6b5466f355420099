//! Unified error handling for honest-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for honest-core operations.
///
/// Every *fatal* condition the core can hit ends up here. Non-fatal
/// conditions are [`crate::domain::Warning`]s and never become errors.
#[derive(Debug, Error, Clone)]
pub enum HonestError {
    /// Errors from the domain layer (invalid names, malformed manifests).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, download, scaffolding).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HonestError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in honestjs".into(),
                "Please report this issue at: https://github.com/honestjs/honestjs/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HonestResult<T> = Result<T, HonestError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> HonestResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> HonestResult<T> {
        self.map_err(|e| HonestError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_keep_their_message() {
        let err: HonestError = ApplicationError::TemplateNotFound {
            name: "mvc".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Template 'mvc' not found");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: HonestError = DomainError::UnknownSchematic {
            name: "widget".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let io: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = io.context("reading manifest").unwrap_err();
        assert!(err.to_string().contains("reading manifest: boom"));
    }
}
