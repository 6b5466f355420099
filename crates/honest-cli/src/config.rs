//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables prefixed `HONESTJS_`, `__` between sections
//!    (`HONESTJS_TEMPLATES__LOCAL_PATH=/src/templates`)
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};

use honest_adapters::{DEFAULT_REFERENCE, DEFAULT_REPOSITORY};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: String,
    pub package_manager: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: "barebone".into(),
            package_manager: "bun".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// GitHub `owner/name` of the template repository.
    pub repository: String,
    /// Branch, tag or commit.
    pub reference: String,
    /// Use this directory instead of downloading.
    pub local_path: Option<PathBuf>,
    /// Where the per-run cache directory is created.
    pub cache_dir: Option<PathBuf>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.into(),
            reference: DEFAULT_REFERENCE.into(),
            local_path: None,
            cache_dir: None,
        }
    }
}

impl TemplateSettings {
    /// Human-readable template source for `info`.
    pub fn source(&self) -> String {
        match &self.local_path {
            Some(path) => path.display().to_string(),
            None => format!("https://github.com/{}", self.repository),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.clone()).required(true),
            None => File::from(Self::config_path()).required(false),
        };
        Self::load_from(file, environment())
    }

    /// Missing keys keep their `Default` values through `#[serde(default)]`.
    fn load_from(
        file: impl Source + Send + Sync + 'static,
        env: Environment,
    ) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.honestjs.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "honestjs", "honestjs")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".honestjs.toml"))
    }

    /// Base directory for the template cache.
    pub fn cache_base(&self) -> PathBuf {
        self.templates
            .cache_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// The local registry directory, if one is configured.
    pub fn local_templates(&self) -> Option<&Path> {
        self.templates.local_path.as_deref()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HONESTJS")
        .prefix_separator("_")
        .separator("__")
}
