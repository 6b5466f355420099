//! Template-specific questions (`prompts.json`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Input,
    Confirm,
    #[serde(alias = "list")]
    Select,
}

/// A choice of a `select` prompt: a plain string or a label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptChoice {
    Plain(String),
    Labeled { name: String, value: Value },
}

impl PromptChoice {
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Labeled { name, .. } => name,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::Plain(s) => Value::String(s.clone()),
            Self::Labeled { value, .. } => value.clone(),
        }
    }
}

/// One question whose answer lands in `ProjectConfig::extra` under `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<PromptChoice>,
}

impl PromptDefinition {
    pub fn parse_list(json: &str) -> Result<Vec<Self>, DomainError> {
        let prompts: Vec<Self> =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidPrompts(e.to_string()))?;
        if let Some(p) = prompts
            .iter()
            .find(|p| p.kind == PromptKind::Select && p.choices.is_empty())
        {
            return Err(DomainError::InvalidPrompts(format!(
                "select prompt '{}' has no choices",
                p.name
            )));
        }
        Ok(prompts)
    }

    /// Index of the default choice of a `select` prompt.
    pub fn default_choice(&self) -> usize {
        self.default
            .as_ref()
            .and_then(|d| self.choices.iter().position(|c| &c.value() == d))
            .unwrap_or(0)
    }

    pub fn default_bool(&self) -> bool {
        self.default.as_ref().and_then(Value::as_bool).unwrap_or(true)
    }

    pub fn default_text(&self) -> Option<String> {
        match self.default.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_all_prompt_kinds() {
        let prompts = PromptDefinition::parse_list(
            r#"[
                { "name": "auth", "type": "confirm", "message": "Add auth?", "default": false },
                { "name": "db", "type": "list", "message": "Database?",
                  "choices": [{ "name": "PostgreSQL", "value": "postgres" }, "sqlite"],
                  "default": "sqlite" },
                { "name": "port", "type": "input", "message": "Port?", "default": 3000 }
            ]"#,
        )
        .unwrap();

        assert_eq!(prompts.len(), 3);
        assert!(!prompts[0].default_bool());
        assert_eq!(prompts[1].kind, PromptKind::Select);
        assert_eq!(prompts[1].choices[0].label(), "PostgreSQL");
        assert_eq!(prompts[1].choices[0].value(), json!("postgres"));
        assert_eq!(prompts[1].default_choice(), 1);
        assert_eq!(prompts[2].default_text().as_deref(), Some("3000"));
    }

    #[test]
    fn select_without_choices_is_invalid() {
        let err = PromptDefinition::parse_list(r#"[{ "name": "db", "type": "select", "message": "?" }]"#)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPrompts(msg) if msg.contains("db")));
    }

    #[test]
    fn non_list_is_invalid() {
        assert!(PromptDefinition::parse_list("{}").is_err());
    }
}
