//! Template Service - registry queries.
//!
//! Reads `templates.json` from the template cache, resolves template
//! directories and loads template-specific prompts.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::TemplateCache,
    },
    domain::{
        Outcome, PROMPTS_FILE, PromptDefinition, REGISTRY_FILE, TemplateDescriptor,
        TemplateRegistry, Warning, WarningStage,
    },
    error::HonestResult,
};

/// Service for template registry operations.
#[derive(Clone)]
pub struct TemplateService {
    cache: Arc<TemplateCache>,
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateService {
    pub fn new(cache: Arc<TemplateCache>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self { cache, filesystem }
    }

    pub fn cache(&self) -> &Arc<TemplateCache> {
        &self.cache
    }

    /// The parsed registry manifest.
    #[instrument(skip_all)]
    pub fn registry(&self) -> HonestResult<TemplateRegistry> {
        let cache_dir = self.cache.acquire()?;
        let manifest = cache_dir.join(REGISTRY_FILE);
        if !self.filesystem.is_file(&manifest) {
            return Err(ApplicationError::ManifestMissing.into());
        }
        let registry = TemplateRegistry::parse(&self.filesystem.read_to_string(&manifest)?)?;
        debug!(count = registry.templates.len(), "Loaded template registry");
        Ok(registry)
    }

    /// All templates, `name` = registry key, `path` defaulted to the key.
    pub fn list(&self) -> HonestResult<Vec<TemplateDescriptor>> {
        Ok(self.registry()?.templates)
    }

    pub fn find(&self, name: &str) -> HonestResult<Option<TemplateDescriptor>> {
        Ok(self.registry()?.find(name).cloned())
    }

    /// Like [`find`](Self::find) but unknown names are an error.
    pub fn get(&self, name: &str) -> HonestResult<TemplateDescriptor> {
        self.find(name)?.ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Directory of `descriptor` inside the cache.
    pub fn resolve_dir(&self, descriptor: &TemplateDescriptor) -> HonestResult<PathBuf> {
        Ok(descriptor.resolve_dir(&self.cache.acquire()?))
    }

    /// Template-specific prompts, `None` for unknown templates or templates
    /// without a `prompts.json`.
    ///
    /// A broken `prompts.json` is reported as a warning, never an error.
    #[instrument(skip(self))]
    pub fn prompts_for(&self, name: &str) -> HonestResult<Outcome<Option<Vec<PromptDefinition>>>> {
        let Some(descriptor) = self.find(name)? else {
            return Ok(Outcome::ok(None));
        };
        let path = self.resolve_dir(&descriptor)?.join(PROMPTS_FILE);
        if !self.filesystem.is_file(&path) {
            return Ok(Outcome::ok(None));
        }

        let loaded = self
            .filesystem
            .read_to_string(&path)
            .and_then(|json| PromptDefinition::parse_list(&json).map_err(Into::into));

        Ok(match loaded {
            Ok(prompts) => Outcome::ok(Some(prompts)),
            Err(e) => {
                warn!(template = name, error = %e, "Could not load prompts");
                Outcome::with_warning(
                    None,
                    Warning::new(
                        WarningStage::Prompts,
                        format!("Could not load prompts for template '{name}': {e}"),
                    ),
                )
            }
        })
    }
}
