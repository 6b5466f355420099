//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire `new` workflow:
//! 1. Resolve the template descriptor
//! 2. Copy the template (structured `files/` or the whole legacy directory)
//! 3. Run the transform pipeline
//! 4. Apply the project configuration
//!
//! Any fatal failure after the destination was claimed removes it again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
        services::{TemplateService, TransformPipeline},
    },
    domain::{
        ProjectConfig, TEMPLATE_CONFIG_FILE, TEMPLATE_FILES_DIR, TemplateConfig,
        TemplateDescriptor, Warning,
    },
    error::HonestResult,
};

/// Result of a successful scaffold.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldReport {
    pub project_path: PathBuf,
    pub template: TemplateDescriptor,
    /// Whether the template had `template.json` + `files/`.
    pub structured: bool,
    pub warnings: Vec<Warning>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    templates: TemplateService,
    filesystem: Arc<dyn Filesystem>,
    pipeline: TransformPipeline,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        templates: TemplateService,
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let pipeline = TransformPipeline::new(filesystem.clone(), runner);
        Self {
            templates,
            filesystem,
            pipeline,
        }
    }

    pub fn templates(&self) -> &TemplateService {
        &self.templates
    }

    /// Create a project at `destination` from `template_name`.
    ///
    /// A relative `destination` is resolved against the current directory.
    #[instrument(
        skip_all,
        fields(template = template_name, destination = %destination.display())
    )]
    pub fn create(
        &self,
        template_name: &str,
        destination: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<ScaffoldReport> {
        let descriptor = self.templates.get(template_name)?;

        if self.filesystem.exists(destination) {
            return Err(ApplicationError::ProjectExists {
                path: destination.to_path_buf(),
            }
            .into());
        }

        // Transform keys may name files by absolute path.
        let destination = std::path::absolute(destination).map_err(|e| {
            ApplicationError::FilesystemError {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        let destination = destination.as_path();

        info!("Creating project from template '{}'", template_name);

        match self.populate(&descriptor, destination, config) {
            Ok((structured, warnings)) => {
                info!(warnings = warnings.len(), "Scaffold completed successfully");
                Ok(ScaffoldReport {
                    project_path: destination.to_path_buf(),
                    template: descriptor,
                    structured,
                    warnings,
                })
            }
            Err(e) => {
                warn!(error = %e, "Scaffold failed, attempting rollback");
                self.rollback(destination);
                Err(ApplicationError::ScaffoldFailed {
                    template: template_name.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn populate(
        &self,
        descriptor: &TemplateDescriptor,
        destination: &Path,
        config: &ProjectConfig,
    ) -> HonestResult<(bool, Vec<Warning>)> {
        let cache_dir = self.templates.cache().acquire()?;
        let template_dir = descriptor.resolve_dir(&cache_dir);
        info!(template_dir = %template_dir.display(), "Using template");

        let config_path = template_dir.join(TEMPLATE_CONFIG_FILE);
        let files_dir = template_dir.join(TEMPLATE_FILES_DIR);
        let structured = self.filesystem.is_file(&config_path) && self.filesystem.exists(&files_dir);

        let mut warnings = Vec::new();
        if structured {
            self.filesystem.copy_dir_all(&files_dir, destination)?;
            let template_config =
                TemplateConfig::parse(&config_path, &self.filesystem.read_to_string(&config_path)?)?;
            warnings.extend(self.pipeline.run_structured(
                destination,
                &template_dir,
                &template_config,
                &cache_dir,
                config,
            )?);
        } else {
            self.filesystem.copy_dir_all(&template_dir, destination)?;
        }

        self.pipeline
            .apply_project_configuration(destination, config)?
            .drain_into(&mut warnings);

        Ok((structured, warnings))
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if !self.filesystem.exists(root) {
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
