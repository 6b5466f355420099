//! Template transform pipeline.
//!
//! Runs after a template's files were copied to the destination:
//!
//! 1. placeholder substitution in text sources
//! 2. declarative per-file transforms from `transforms.json`
//! 3. shared configuration files from `shared/configs/`
//! 4. project configuration (`package.json`, `README.md`, git, install)
//!
//! Steps 1-3 only run for structured templates; step 4 always runs.
//! Non-fatal problems come back as [`Warning`]s.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{CommandRunner, Filesystem},
    domain::{
        FileAction, Outcome, PackageManifest, ProjectConfig, RenderContext, TRANSFORMS_FILE,
        TemplateConfig, TransformSet, Warning, WarningStage,
    },
    error::HonestResult,
};

/// Extensions whose files get placeholder substitution.
pub const SUBSTITUTED_EXTENSIONS: [&str; 10] = [
    "json", "md", "js", "ts", "jsx", "tsx", "mjs", "cjs", "mts", "cts",
];

/// Shared files and the config flag gating each (`None` = always).
pub const SHARED_CONFIGS: [(&str, Option<&str>); 9] = [
    ("eslint.config.js", Some("eslint")),
    ("prettier.config.js", Some("prettier")),
    ("tsconfig.json", Some("typescript")),
    ("Dockerfile", Some("docker")),
    ("docker-compose.yml", Some("docker")),
    (".dockerignore", Some("docker")),
    (".gitignore", Some("git")),
    (".prettierignore", Some("prettier")),
    ("LICENSE", None),
];

pub struct TransformPipeline {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn CommandRunner>,
}

impl TransformPipeline {
    pub fn new(filesystem: Arc<dyn Filesystem>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { filesystem, runner }
    }

    /// Steps 1-3 for a structured template.
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn run_structured(
        &self,
        project: &Path,
        template_dir: &Path,
        template_config: &TemplateConfig,
        cache_dir: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<Vec<Warning>> {
        let mut warnings = Vec::new();

        let substituted = self
            .substitute_variables(project, template_config, config)?
            .drain_into(&mut warnings);
        debug!(files = substituted, "Substituted placeholders");

        let transformed = self
            .apply_transforms(project, template_dir, config)?
            .drain_into(&mut warnings);
        debug!(files = transformed, "Applied transforms");

        let copied = self
            .copy_shared_configs(project, cache_dir, config)?
            .drain_into(&mut warnings);
        debug!(files = ?copied, "Copied shared configs");

        Ok(warnings)
    }

    /// Replace `{{projectName}}`, `{{packageManager}}` and declared
    /// template variables in every text source. Returns the number of files
    /// rewritten.
    pub fn substitute_variables(
        &self,
        project: &Path,
        template_config: &TemplateConfig,
        config: &ProjectConfig,
    ) -> HonestResult<Outcome<usize>> {
        let context = variable_context(template_config, config);
        let mut outcome = Outcome::ok(0);

        for file in self.filesystem.list_files(project)? {
            if !has_substituted_extension(&file) {
                continue;
            }
            let content = match self.filesystem.read_to_string(&file) {
                Ok(content) => content,
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "Skipping unreadable file");
                    outcome.warnings.push(Warning::new(
                        WarningStage::Variables,
                        format!("Skipped {}: {}", relative_key(project, &file), e),
                    ));
                    continue;
                }
            };
            let rendered = context.render(&content);
            if rendered != content {
                self.filesystem.write_file(&file, &rendered)?;
                outcome.value += 1;
            }
        }
        Ok(outcome)
    }

    /// Apply `transforms.json` rules. Returns the number of files touched.
    pub fn apply_transforms(
        &self,
        project: &Path,
        template_dir: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<Outcome<usize>> {
        let path = template_dir.join(TRANSFORMS_FILE);
        if !self.filesystem.is_file(&path) {
            return Ok(Outcome::ok(0));
        }

        let transforms = match self
            .filesystem
            .read_to_string(&path)
            .and_then(|json| TransformSet::parse(&json).map_err(Into::into))
        {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "Could not load transforms");
                return Ok(Outcome::with_warning(
                    0,
                    Warning::new(
                        WarningStage::Transforms,
                        format!("Could not load transforms: {e}"),
                    ),
                ));
            }
        };
        info!(rules = transforms.len(), "Loaded transforms");

        let mut outcome = Outcome::ok(0);
        for rejected in transforms.rejected() {
            warn!(error = %rejected, "Skipping transform");
            outcome.warnings.push(Warning::new(
                WarningStage::Transforms,
                format!("Skipped transform: {rejected}"),
            ));
        }
        for file in self.filesystem.list_files(project)? {
            let relative = relative_key(project, &file);
            let absolute = file.display().to_string();
            let Some(rules) = transforms.rules_for(&relative, &absolute) else {
                continue;
            };

            match self.transform_file(&file, template_dir, rules, config) {
                Ok(true) => outcome.value += 1,
                Ok(false) => {}
                Err(reason) => {
                    warn!(file = %relative, %reason, "Transform failed");
                    outcome.warnings.push(Warning::new(
                        WarningStage::Transforms,
                        format!("Transform failed for {relative}: {reason}"),
                    ));
                }
            }
        }
        Ok(outcome)
    }

    fn transform_file(
        &self,
        file: &Path,
        template_dir: &Path,
        rules: &[crate::domain::TransformRule],
        config: &ProjectConfig,
    ) -> Result<bool, String> {
        // Binary files can still be deleted or replaced by a copy.
        let text = self.filesystem.read_to_string(file).ok();
        let action = TransformSet::plan(rules, text.as_deref().unwrap_or_default(), config);

        match action {
            None => Ok(false),
            Some(FileAction::Delete) => {
                self.filesystem.remove_file(file).map_err(|e| e.to_string())?;
                Ok(true)
            }
            Some(FileAction::Write(content)) => {
                if text.is_none() {
                    return Err("file is not valid UTF-8 text".into());
                }
                self.filesystem
                    .write_file(file, &content)
                    .map_err(|e| e.to_string())?;
                Ok(true)
            }
            Some(FileAction::Copy(source)) => {
                let source = template_dir.join(source);
                if !self.filesystem.is_file(&source) {
                    return Err(format!("copy source {} does not exist", source.display()));
                }
                self.filesystem
                    .copy_file(&source, file)
                    .map_err(|e| e.to_string())?;
                Ok(true)
            }
        }
    }

    /// Copy the enabled shared configs into the project root.
    ///
    /// Missing sources are skipped silently.
    pub fn copy_shared_configs(
        &self,
        project: &Path,
        cache_dir: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<Outcome<Vec<&'static str>>> {
        let shared = cache_dir.join("shared").join("configs");
        let mut outcome = Outcome::ok(Vec::new());
        if !self.filesystem.exists(&shared) {
            return Ok(outcome);
        }

        for (file, gate) in SHARED_CONFIGS {
            if gate.is_some_and(|key| !config.flag(key)) {
                continue;
            }
            let source = shared.join(file);
            if !self.filesystem.is_file(&source) {
                continue;
            }
            match self.filesystem.copy_file(&source, &project.join(file)) {
                Ok(()) => {
                    info!(file, "Copied shared config");
                    outcome.value.push(file);
                }
                Err(e) => outcome.warnings.push(Warning::new(
                    WarningStage::SharedConfigs,
                    format!("Could not copy {file}: {e}"),
                )),
            }
        }
        Ok(outcome)
    }

    /// Final step: `package.json`, `README.md`, git init and install.
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn apply_project_configuration(
        &self,
        project: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<Outcome<()>> {
        let mut outcome = Outcome::ok(());

        let manifest_path = project.join("package.json");
        if self.filesystem.is_file(&manifest_path) {
            let mut manifest = PackageManifest::parse(&self.filesystem.read_to_string(&manifest_path)?)?;
            manifest.configure(config);
            self.filesystem
                .write_file(&manifest_path, &manifest.to_pretty_string())?;
            debug!("Updated package.json");
        }

        let readme = project.join("README.md");
        if self.filesystem.is_file(&readme) {
            let content = self.filesystem.read_to_string(&readme)?;
            self.filesystem
                .write_file(&readme, &config.render_context().render(&content))?;
        }

        if config.git {
            match self.runner.run("git", &["init".to_string()], project, false) {
                Ok(()) => info!("Initialized git repository"),
                Err(e) => {
                    warn!(error = %e, "Could not initialize git repository");
                    outcome.warnings.push(Warning::new(
                        WarningStage::Git,
                        format!("Could not initialize git repository: {e}"),
                    ));
                }
            }
        }

        if config.install {
            let pm = config.package_manager.as_str();
            match self.runner.run(pm, &["install".to_string()], project, true) {
                Ok(()) => info!(package_manager = pm, "Installed dependencies"),
                Err(e) => {
                    warn!(error = %e, "Could not install dependencies");
                    outcome.warnings.push(Warning::new(
                        WarningStage::Install,
                        format!("Could not install dependencies: {e}"),
                    ));
                }
            }
        }

        Ok(outcome)
    }
}

fn variable_context(template_config: &TemplateConfig, config: &ProjectConfig) -> RenderContext {
    let mut context = config.render_context();
    for (key, default) in template_config.variables.iter().flatten() {
        if context.get(key).is_some() {
            continue;
        }
        let value = config.extra_text(key).unwrap_or_else(|| match default {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        });
        context.insert(key.clone(), value);
    }
    context
}

fn has_substituted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUBSTITUTED_EXTENSIONS.contains(&ext))
}

/// `project`-relative path with `/` separators, used as a transform key.
fn relative_key(project: &Path, file: &Path) -> String {
    let relative: PathBuf = file.strip_prefix(project).unwrap_or(file).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
