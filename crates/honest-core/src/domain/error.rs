// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `HonestError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Unknown schematic: {name}")]
    UnknownSchematic { name: String },

    #[error("Unknown package manager '{value}'")]
    UnknownPackageManager { value: String },

    // ========================================================================
    // Malformed template data
    // ========================================================================
    #[error("Invalid template registry: {0}")]
    InvalidRegistry(String),

    #[error("Invalid template config at {path}: {reason}")]
    InvalidTemplateConfig { path: String, reason: String },

    #[error("Invalid transform for '{key}': {reason}")]
    InvalidTransform { key: String, reason: String },

    #[error("Invalid prompt definitions: {0}")]
    InvalidPrompts(String),

    #[error("Invalid package.json: {0}")]
    InvalidPackageManifest(String),

    #[error("Path escapes the template directory: {path}")]
    PathEscapesTemplate { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { .. } => vec![
                "Use lowercase letters, digits, and hyphens".into(),
                "Examples: my-app, blog-api, shop2".into(),
            ],
            Self::UnknownSchematic { .. } => {
                let mut lines = vec!["Available schematics:".to_string()];
                for schematic in crate::domain::Schematic::all() {
                    lines.push(format!(
                        "  {:<18} - Generate a {}",
                        format!("{} ({})", schematic.kind, schematic.kind.alias()),
                        schematic.kind
                    ));
                }
                lines.push("Example: honestjs g controller user".into());
                lines
            }
            Self::UnknownPackageManager { .. } => {
                vec!["Supported package managers: bun, npm, yarn, pnpm".into()]
            }
            Self::InvalidRegistry(_) => vec![
                "The downloaded template registry is malformed".into(),
                "Try again later or point templates.local_path at a valid registry".into(),
            ],
            Self::InvalidTemplateConfig { path, .. } => {
                vec![format!("Check the template config at {}", path)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::UnknownSchematic { .. }
            | Self::UnknownPackageManager { .. } => ErrorCategory::Validation,
            Self::InvalidRegistry(_)
            | Self::InvalidTemplateConfig { .. }
            | Self::InvalidTransform { .. }
            | Self::InvalidPrompts(_)
            | Self::InvalidPackageManifest(_)
            | Self::PathEscapesTemplate { .. } => ErrorCategory::Internal,
        }
    }
}
