//! Project configuration chosen by the user for `new`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainError, RenderContext};

/// JavaScript package manager used for scripts and installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Bun,
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [Self::Bun, Self::Npm, Self::Yarn, Self::Pnpm];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownPackageManager { value: s.into() })
    }
}

/// Check a project directory name: lowercase ASCII letters, digits and hyphens.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.is_empty() {
        "project name is required"
    } else if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        "only lowercase letters, numbers, and hyphens are allowed"
    } else {
        return Ok(());
    };
    Err(DomainError::InvalidName {
        name: name.into(),
        reason: reason.into(),
    })
}

/// Fully resolved configuration for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub template: String,
    pub package_manager: PackageManager,
    pub typescript: bool,
    pub eslint: bool,
    pub prettier: bool,
    pub docker: bool,
    pub git: bool,
    pub install: bool,
    /// Answers to template-specific prompts.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectConfig {
    /// Defaults: bun and every feature switched on.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            package_manager: PackageManager::Bun,
            typescript: true,
            eslint: true,
            prettier: true,
            docker: true,
            git: true,
            install: true,
            extra: BTreeMap::new(),
        }
    }

    /// Truthiness of a named setting, used by transform conditions.
    ///
    /// Unknown keys are `false`.
    pub fn flag(&self, key: &str) -> bool {
        match key {
            "typescript" => self.typescript,
            "eslint" => self.eslint,
            "prettier" => self.prettier,
            "docker" => self.docker,
            "git" => self.git,
            "install" => self.install,
            _ => self.extra.get(key).is_some_and(is_truthy),
        }
    }

    /// Value of an extra answer rendered as placeholder text.
    pub fn extra_text(&self, key: &str) -> Option<String> {
        self.extra.get(key).map(value_text)
    }

    /// `projectName` and `packageManager` placeholders.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("projectName", self.name.clone())
            .with_variable("packageManager", self.package_manager.as_str())
    }
}

/// Partial configuration as collected from flags and prompts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectOptions {
    pub package_manager: Option<PackageManager>,
    pub typescript: Option<bool>,
    pub eslint: Option<bool>,
    pub prettier: Option<bool>,
    pub docker: Option<bool>,
    pub git: Option<bool>,
    pub install: Option<bool>,
    pub extra: BTreeMap<String, Value>,
}

impl ProjectOptions {
    /// Overlay the set fields onto the defaults.
    pub fn resolve(self, name: impl Into<String>, template: impl Into<String>) -> ProjectConfig {
        let defaults = ProjectConfig::new(name, template);
        ProjectConfig {
            package_manager: self.package_manager.unwrap_or(defaults.package_manager),
            typescript: self.typescript.unwrap_or(defaults.typescript),
            eslint: self.eslint.unwrap_or(defaults.eslint),
            prettier: self.prettier.unwrap_or(defaults.prettier),
            docker: self.docker.unwrap_or(defaults.docker),
            git: self.git.unwrap_or(defaults.git),
            install: self.install.unwrap_or(defaults.install),
            extra: self.extra,
            ..defaults
        }
    }

    /// Mutable access to a boolean feature by name.
    pub fn feature_mut(&mut self, key: &str) -> Option<&mut Option<bool>> {
        match key {
            "typescript" => Some(&mut self.typescript),
            "eslint" => Some(&mut self.eslint),
            "prettier" => Some(&mut self.prettier),
            "docker" => Some(&mut self.docker),
            "git" => Some(&mut self.git),
            "install" => Some(&mut self.install),
            _ => None,
        }
    }
}

/// Feature switches, in the order they are asked.
pub const FEATURES: [(&str, &str); 6] = [
    ("typescript", "Use TypeScript?"),
    ("eslint", "Add ESLint for code linting?"),
    ("prettier", "Add Prettier for code formatting?"),
    ("docker", "Add Docker configuration?"),
    ("git", "Initialize git repository?"),
    ("install", "Install dependencies?"),
];

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn package_manager_parses_case_insensitively() {
        assert_eq!("NPM".parse::<PackageManager>().unwrap(), PackageManager::Npm);
        assert_eq!("pnpm".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!("cargo".parse::<PackageManager>().is_err());
    }

    #[test]
    fn project_names_are_lowercase_kebab() {
        assert!(validate_project_name("my-api-2").is_ok());
        for bad in ["", "My-App", "my_app", "my app", "../x"] {
            assert!(
                matches!(validate_project_name(bad), Err(DomainError::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn unset_options_default_to_bun_and_true() {
        let config = ProjectOptions::default().resolve("blog", "barebone");
        assert_eq!(config, ProjectConfig::new("blog", "barebone"));
        assert_eq!(config.package_manager, PackageManager::Bun);
        assert!(config.eslint && config.docker && config.install);
    }

    #[test]
    fn set_options_win() {
        let options = ProjectOptions {
            package_manager: Some(PackageManager::Yarn),
            eslint: Some(false),
            ..ProjectOptions::default()
        };
        let config = options.resolve("blog", "mvc");
        assert_eq!(config.package_manager, PackageManager::Yarn);
        assert!(!config.eslint);
        assert!(config.prettier);
    }

    #[test]
    fn flags_cover_features_and_extra_answers() {
        let mut config = ProjectConfig::new("blog", "mvc");
        config.docker = false;
        config.extra.insert("auth".into(), json!(true));
        config.extra.insert("db".into(), json!(""));
        assert!(config.flag("git"));
        assert!(!config.flag("docker"));
        assert!(config.flag("auth"));
        assert!(!config.flag("db"));
        assert!(!config.flag("unknown"));
    }

    #[test]
    fn extra_text_renders_scalars() {
        let mut config = ProjectConfig::new("blog", "mvc");
        config.extra.insert("port".into(), json!(3000));
        config.extra.insert("db".into(), json!("postgres"));
        assert_eq!(config.extra_text("port").as_deref(), Some("3000"));
        assert_eq!(config.extra_text("db").as_deref(), Some("postgres"));
        assert_eq!(config.extra_text("nope"), None);
    }

    #[test]
    fn feature_mut_reaches_every_switch() {
        let mut options = ProjectOptions::default();
        for (key, _) in FEATURES {
            *options.feature_mut(key).unwrap() = Some(false);
        }
        let config = options.resolve("x", "y");
        for (key, _) in FEATURES {
            assert!(!config.flag(key), "{key} should be off");
        }
    }
}
