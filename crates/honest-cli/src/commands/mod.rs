//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results. Adapter
//! wiring lives here so every command builds its services the same way.

pub mod completions;
pub mod generate;
pub mod info;
pub mod list;
pub mod new;

use std::sync::Arc;

use honest_adapters::{
    GithubTarballFetcher, LocalDirectoryFetcher, LocalFilesystem, SystemCommandRunner,
};
use honest_core::application::{
    ScaffoldService, TemplateCache, TemplateService,
    ports::{Filesystem, TemplateFetcher},
};
use tracing::debug;

use crate::config::AppConfig;

/// Template source chosen by configuration.
fn fetcher(config: &AppConfig) -> Box<dyn TemplateFetcher> {
    match config.local_templates() {
        Some(path) => Box::new(LocalDirectoryFetcher::new(path)),
        None => Box::new(GithubTarballFetcher::new(
            &config.templates.repository,
            &config.templates.reference,
        )),
    }
}

/// Registry reader over a fresh cache; the cache directory goes away when
/// the last clone of the service is dropped.
pub(crate) fn template_service(config: &AppConfig) -> TemplateService {
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let cache =
        TemplateCache::with_base_dir(fetcher(config), filesystem.clone(), config.cache_base());
    debug!(source = %cache.source(), "Template cache ready");
    TemplateService::new(Arc::new(cache), filesystem)
}

pub(crate) fn scaffold_service(templates: TemplateService) -> ScaffoldService {
    ScaffoldService::new(
        templates,
        Arc::new(LocalFilesystem::new()),
        Arc::new(SystemCommandRunner::new()),
    )
}
