//! Template registry model.
//!
//! The template repository carries a `templates.json` manifest at its root:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "templates": { "barebone": { "description": "…", "path": "templates/barebone" } },
//!   "categories": { "starter": "Starter templates" }
//! }
//! ```
//!
//! Each entry's `name` is its key and `path` defaults to the key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// File name of the registry manifest at the repository root.
pub const REGISTRY_FILE: &str = "templates.json";
/// Marks a structured template.
pub const TEMPLATE_CONFIG_FILE: &str = "template.json";
/// Payload directory of a structured template.
pub const TEMPLATE_FILES_DIR: &str = "files";
/// Declarative per-file transforms.
pub const TRANSFORMS_FILE: &str = "transforms.json";
/// Declarative template-specific prompts.
pub const PROMPTS_FILE: &str = "prompts.json";

/// One entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl TemplateDescriptor {
    /// Directory of this template inside the cache directory.
    ///
    /// Paths already rooted at `templates/` are taken as-is, anything else is
    /// looked up under `templates/`.
    pub fn resolve_dir(&self, cache_dir: &Path) -> PathBuf {
        if self.path.starts_with("templates/") {
            cache_dir.join(&self.path)
        } else {
            cache_dir.join("templates").join(&self.path)
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn category_or_other(&self) -> &str {
        self.category.as_deref().unwrap_or("Other")
    }
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    description: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRegistry {
    #[serde(default)]
    version: String,
    #[serde(default)]
    templates: BTreeMap<String, RawDescriptor>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

/// Parsed `templates.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateRegistry {
    pub version: String,
    pub templates: Vec<TemplateDescriptor>,
    pub categories: BTreeMap<String, String>,
}

impl TemplateRegistry {
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        let raw: RawRegistry =
            serde_json::from_str(json).map_err(|e| DomainError::InvalidRegistry(e.to_string()))?;

        let templates = raw
            .templates
            .into_iter()
            .map(|(key, entry)| TemplateDescriptor {
                path: entry.path.filter(|p| !p.is_empty()).unwrap_or_else(|| key.clone()),
                name: key,
                description: entry.description,
                category: entry.category,
                tags: entry.tags,
                version: entry.version,
                author: entry.author,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            templates,
            categories: raw.categories,
        })
    }

    pub fn find(&self, name: &str) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    /// Every distinct tag, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .templates
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }
}

/// Filter applied by `list`. Both criteria must match when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl TemplateFilter {
    pub fn matches(&self, descriptor: &TemplateDescriptor) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| descriptor.category.as_deref() == Some(c));
        let tag_ok = self.tag.as_deref().is_none_or(|t| descriptor.has_tag(t));
        category_ok && tag_ok
    }

    pub fn apply<'a>(&self, templates: &'a [TemplateDescriptor]) -> Vec<&'a TemplateDescriptor> {
        templates.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Parsed `template.json` of a structured template.
///
/// Only `variables` is interpreted; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub variables: Option<BTreeMap<String, serde_json::Value>>,
}

impl TemplateConfig {
    pub fn parse(path: &Path, json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::InvalidTemplateConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
