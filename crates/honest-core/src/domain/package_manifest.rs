//! `package.json` rewriting for a freshly scaffolded project.

use serde_json::{Map, Value};

use crate::domain::{DomainError, PackageManager, ProjectConfig};

const LINT_SCRIPTS: [&str; 2] = ["lint", "lint:fix"];
const FORMAT_SCRIPTS: [&str; 2] = ["format", "format:check"];
const DOCKER_SCRIPTS: [(&str, &str); 4] = [
    ("docker:build", "docker compose build"),
    ("docker:up", "docker compose up -d"),
    ("docker:up:build", "docker compose up -d --build"),
    ("docker:down", "docker compose down"),
];

/// A parsed `package.json`, key order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        match serde_json::from_str(json) {
            Ok(Value::Object(root)) => Ok(Self { root }),
            Ok(_) => Err(DomainError::InvalidPackageManifest(
                "top-level value is not an object".into(),
            )),
            Err(e) => Err(DomainError::InvalidPackageManifest(e.to_string())),
        }
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&self.root).unwrap_or_else(|_| "{}".into());
        out.push('\n');
        out
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    pub fn script(&self, key: &str) -> Option<&str> {
        self.root.get("scripts")?.get(key)?.as_str()
    }

    /// Apply name, package manager and feature switches.
    pub fn configure(&mut self, config: &ProjectConfig) {
        if !config.name.is_empty() {
            self.root.insert("name".into(), Value::String(config.name.clone()));
        }

        let pm = config.package_manager;
        if pm != PackageManager::Bun {
            if let Some(scripts) = self.root.get_mut("scripts").and_then(Value::as_object_mut) {
                for script in scripts.values_mut() {
                    if let Some(rest) = script.as_str().and_then(|s| s.strip_prefix("bun ")) {
                        *script = Value::String(format!("{pm} {rest}"));
                    }
                }
            }
        }

        self.toggle(
            config.eslint,
            &[
                (LINT_SCRIPTS[0], format!("{pm} run eslint .")),
                (LINT_SCRIPTS[1], format!("{pm} run eslint . --fix")),
            ],
        );
        self.toggle(
            config.prettier,
            &[
                (FORMAT_SCRIPTS[0], format!("{pm} run prettier --write .")),
                (FORMAT_SCRIPTS[1], format!("{pm} run prettier --check .")),
            ],
        );
        let docker: Vec<(&str, String)> = DOCKER_SCRIPTS
            .iter()
            .map(|(k, v)| (*k, (*v).to_string()))
            .collect();
        self.toggle(config.docker, &docker);
    }

    /// Set every script when `enabled`, otherwise remove them.
    fn toggle(&mut self, enabled: bool, scripts: &[(&str, String)]) {
        if enabled {
            let entry = self
                .root
                .entry("scripts")
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Some(map) = entry.as_object_mut() {
                for (key, value) in scripts {
                    map.insert((*key).to_string(), Value::String(value.clone()));
                }
            }
        } else if let Some(map) = self.root.get_mut("scripts").and_then(Value::as_object_mut) {
            for (key, _) in scripts {
                map.shift_remove(*key);
            }
        }
    }
}
