//! Use a local checkout of the template repository.

use std::path::{Path, PathBuf};

use honest_core::{
    application::ports::{Filesystem, TemplateFetcher},
    error::HonestResult,
};
use tracing::{info, instrument};

use super::FetchError;
use crate::filesystem::LocalFilesystem;

/// Copies a directory laid out like the template repository.
///
/// Copying (rather than pointing at the directory) keeps `release()` from
/// deleting the user's checkout.
#[derive(Debug, Clone)]
pub struct LocalDirectoryFetcher {
    source: PathBuf,
    filesystem: LocalFilesystem,
}

impl LocalDirectoryFetcher {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            filesystem: LocalFilesystem::new(),
        }
    }
}

impl TemplateFetcher for LocalDirectoryFetcher {
    #[instrument(skip(self), fields(source = %self.source.display()))]
    fn fetch(&self, dest: &Path) -> HonestResult<()> {
        if !self.source.is_dir() {
            return Err(FetchError::MissingSource(self.source.display().to_string()).into());
        }
        self.filesystem.copy_dir_all(&self.source, dest)?;
        info!(dest = %dest.display(), "Copied local template repository");
        Ok(())
    }

    fn describe(&self) -> String {
        self.source.display().to_string()
    }
}
