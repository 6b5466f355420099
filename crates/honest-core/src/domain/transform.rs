//! Declarative per-file transforms (`transforms.json`).
//!
//! Templates describe edits to their own files as data rather than code:
//!
//! ```json
//! {
//!   "src/app.ts": { "action": "substitute", "find": "3000", "replace": "8080" },
//!   ".eslintrc.json": { "action": "delete", "unless": "eslint" },
//!   "src/db.ts": [
//!     { "action": "copy", "source": "variants/db.postgres.ts", "when": "postgres" },
//!     { "action": "replace", "content": "// {{projectName}} has no database\n", "unless": "postgres" }
//!   ]
//! }
//! ```
//!
//! Keys are paths relative to the project root, or absolute paths.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{DomainError, ProjectConfig};

/// What a rule does to its file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TransformAction {
    Delete,
    Replace { content: String },
    Substitute { find: String, replace: String },
    /// Path relative to the template directory.
    Copy { source: String },
}

/// One rule with optional conditions on config flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransformRule {
    #[serde(flatten)]
    pub action: TransformAction,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub unless: Option<String>,
}

impl TransformRule {
    pub fn applies_to(&self, config: &ProjectConfig) -> bool {
        let when_ok = self.when.as_deref().is_none_or(|k| config.flag(k));
        let unless_ok = self.unless.as_deref().is_none_or(|k| !config.flag(k));
        when_ok && unless_ok
    }
}

/// Final effect of every applicable rule on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Delete,
    Write(String),
    /// Copy a template file (relative to the template dir) over the target.
    Copy(String),
}

/// Parsed `transforms.json`.
///
/// A key whose rules fail to parse or validate is kept out of `rules` and
/// recorded in `rejected`; its file is left as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformSet {
    rules: BTreeMap<String, Vec<TransformRule>>,
    rejected: Vec<DomainError>,
}

impl TransformSet {
    /// Fails only when the document itself is not a JSON object.
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidTransform {
                key: "transforms.json".into(),
                reason: e.to_string(),
            })?;

        let mut set = Self::default();
        for (key, value) in raw {
            match parse_rules(&key, value) {
                Ok(parsed) => {
                    set.rules.insert(key, parsed);
                }
                Err(e) => set.rejected.push(e),
            }
        }
        Ok(set)
    }

    /// Keys dropped because their rules were invalid.
    pub fn rejected(&self) -> &[DomainError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules for a file, looked up by relative path first, then absolute.
    pub fn rules_for(&self, relative: &str, absolute: &str) -> Option<&[TransformRule]> {
        self.rules
            .get(relative)
            .or_else(|| self.rules.get(absolute))
            .map(Vec::as_slice)
    }

    /// Fold the applicable rules over `content`.
    ///
    /// `delete` and `copy` end the chain. Returns `None` when no rule applied.
    pub fn plan(rules: &[TransformRule], content: &str, config: &ProjectConfig) -> Option<FileAction> {
        let mut current: Option<String> = None;
        for rule in rules.iter().filter(|r| r.applies_to(config)) {
            match &rule.action {
                TransformAction::Delete => return Some(FileAction::Delete),
                TransformAction::Copy { source } => return Some(FileAction::Copy(source.clone())),
                TransformAction::Replace { content } => {
                    current = Some(config.render_context().render(content));
                }
                TransformAction::Substitute { find, replace } => {
                    let base = current.as_deref().unwrap_or(content);
                    current = Some(base.replace(find.as_str(), replace));
                }
            }
        }
        current.map(FileAction::Write)
    }
}

fn parse_rules(key: &str, value: Value) -> Result<Vec<TransformRule>, DomainError> {
    let parsed = match value {
        Value::Array(_) => serde_json::from_value::<Vec<TransformRule>>(value),
        other => serde_json::from_value::<TransformRule>(other).map(|r| vec![r]),
    }
    .map_err(|e| DomainError::InvalidTransform {
        key: key.into(),
        reason: e.to_string(),
    })?;

    for rule in &parsed {
        validate(key, rule)?;
    }
    Ok(parsed)
}

fn validate(key: &str, rule: &TransformRule) -> Result<(), DomainError> {
    match &rule.action {
        TransformAction::Substitute { find, .. } if find.is_empty() => Err(DomainError::InvalidTransform {
            key: key.into(),
            reason: "substitute needs a non-empty 'find'".into(),
        }),
        TransformAction::Copy { source } if !stays_inside(Path::new(source)) => {
            Err(DomainError::PathEscapesTemplate { path: source.clone() })
        }
        _ => Ok(()),
    }
}

/// True for relative paths without `..` components.
pub fn stays_inside(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
