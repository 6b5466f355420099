//! Process-local cache of the downloaded template repository.
//!
//! One [`TemplateCache`] is created per command and shared (via `Arc`) by the
//! services that need template files. The first [`TemplateCache::acquire`]
//! downloads the repository into a fresh temporary directory; later calls
//! reuse it. Dropping the cache removes the directory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, TemplateFetcher};
use crate::error::{HonestError, HonestResult};

const DIR_PREFIX: &str = "honestjs-templates-";

pub struct TemplateCache {
    fetcher: Box<dyn TemplateFetcher>,
    filesystem: Arc<dyn Filesystem>,
    base_dir: PathBuf,
    current: Mutex<Option<PathBuf>>,
}

impl TemplateCache {
    /// Cache rooted in the system temp directory.
    pub fn new(fetcher: Box<dyn TemplateFetcher>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self::with_base_dir(fetcher, filesystem, std::env::temp_dir())
    }

    pub fn with_base_dir(
        fetcher: Box<dyn TemplateFetcher>,
        filesystem: Arc<dyn Filesystem>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            filesystem,
            base_dir: base_dir.into(),
            current: Mutex::new(None),
        }
    }

    /// Where templates come from, for display.
    pub fn source(&self) -> String {
        self.fetcher.describe()
    }

    /// Return the cache directory, downloading the repository on first use.
    #[instrument(skip_all, fields(source = %self.fetcher.describe()))]
    pub fn acquire(&self) -> HonestResult<PathBuf> {
        let mut current = self.lock();

        if let Some(dir) = current.as_ref() {
            if self.filesystem.exists(dir) {
                debug!(dir = %dir.display(), "Reusing template cache");
                return Ok(dir.clone());
            }
            debug!(dir = %dir.display(), "Cached directory vanished, fetching again");
            *current = None;
        }

        let dir = self.base_dir.join(format!("{DIR_PREFIX}{}", Utc::now().timestamp_millis()));
        info!(dir = %dir.display(), "Downloading templates");

        if let Err(err) = self.fetcher.fetch(&dir) {
            self.discard(&dir);
            return Err(ApplicationError::FetchFailed {
                reason: fetch_reason(&err),
            }
            .into());
        }

        *current = Some(dir.clone());
        Ok(dir)
    }

    /// Remove the cache directory if one was created. Idempotent.
    #[instrument(skip_all)]
    pub fn release(&self) {
        let mut current = self.lock();
        if let Some(dir) = current.take() {
            self.discard(&dir);
        }
    }

    /// The directory recorded by the last successful [`acquire`](Self::acquire).
    pub fn cached_dir(&self) -> Option<PathBuf> {
        self.lock().clone()
    }

    fn discard(&self, dir: &Path) {
        if !self.filesystem.exists(dir) {
            return;
        }
        match self.filesystem.remove_dir_all(dir) {
            Ok(()) => debug!(dir = %dir.display(), "Removed template cache"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "Failed to remove template cache"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PathBuf>> {
        // A panic while holding the lock leaves the Option intact.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for TemplateCache {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("source", &self.fetcher.describe())
            .field("base_dir", &self.base_dir)
            .field("current", &self.cached_dir())
            .finish()
    }
}

/// Avoid "Failed to download templates: Failed to download templates: …".
fn fetch_reason(err: &HonestError) -> String {
    match err {
        HonestError::Application(ApplicationError::FetchFailed { reason }) => reason.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateFetcher};
    use mockall::predicate::always;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;

    /// Mock filesystem whose `exists` reflects fetched and removed dirs.
    fn tracking_fs(present: Arc<StdMutex<HashSet<PathBuf>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        let seen = present.clone();
        fs.expect_exists()
            .returning(move |p| seen.lock().unwrap().contains(p));
        let removed = present;
        fs.expect_remove_dir_all().returning(move |p| {
            removed.lock().unwrap().remove(p);
            Ok(())
        });
        fs
    }

    #[test]
    fn acquire_fetches_once_and_memoises() {
        let present = Arc::new(StdMutex::new(HashSet::new()));
        let mut fetcher = MockTemplateFetcher::new();
        let written = present.clone();
        fetcher
            .expect_fetch()
            .with(always())
            .times(1)
            .returning(move |dest| {
                written.lock().unwrap().insert(dest.to_path_buf());
                Ok(())
            });
        fetcher.expect_describe().return_const("test".to_string());

        let cache = TemplateCache::with_base_dir(
            Box::new(fetcher),
            Arc::new(tracking_fs(present.clone())),
            "/tmp/base",
        );

        let first = cache.acquire().unwrap();
        let second = cache.acquire().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("/tmp/base"));
        assert!(
            first
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("honestjs-templates-")
        );
        assert_eq!(cache.cached_dir(), Some(first.clone()));

        cache.release();
        assert_eq!(cache.cached_dir(), None);
        assert!(!present.lock().unwrap().contains(&first));

        // Second release is a no-op.
        cache.release();
    }

    #[test]
    fn fetch_failure_is_wrapped_and_not_recorded() {
        let present = Arc::new(StdMutex::new(HashSet::new()));
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Err(ApplicationError::FetchFailed {
                reason: "HTTP 404".into(),
            }
            .into())
        });
        fetcher.expect_describe().return_const("test".to_string());

        let cache =
            TemplateCache::with_base_dir(Box::new(fetcher), Arc::new(tracking_fs(present)), "/tmp/base");

        let err = cache.acquire().unwrap_err();
        assert_eq!(err.to_string(), "Failed to download templates: HTTP 404");
        assert_eq!(cache.cached_dir(), None);
    }

    #[test]
    fn vanished_directory_is_fetched_again() {
        let present = Arc::new(StdMutex::new(HashSet::new()));
        let mut fetcher = MockTemplateFetcher::new();
        let written = present.clone();
        fetcher.expect_fetch().times(2).returning(move |dest| {
            written.lock().unwrap().insert(dest.to_path_buf());
            Ok(())
        });
        fetcher.expect_describe().return_const("test".to_string());

        let cache = TemplateCache::with_base_dir(
            Box::new(fetcher),
            Arc::new(tracking_fs(present.clone())),
            "/tmp/base",
        );

        cache.acquire().unwrap();
        present.lock().unwrap().clear();
        let second = cache.acquire().unwrap();
        assert_eq!(cache.cached_dir(), Some(second.clone()));
        assert!(present.lock().unwrap().contains(&second));
    }

    #[test]
    fn drop_releases_the_directory() {
        let present = Arc::new(StdMutex::new(HashSet::new()));
        let mut fetcher = MockTemplateFetcher::new();
        let written = present.clone();
        fetcher.expect_fetch().returning(move |dest| {
            written.lock().unwrap().insert(dest.to_path_buf());
            Ok(())
        });
        fetcher.expect_describe().return_const("test".to_string());

        let cache = TemplateCache::with_base_dir(
            Box::new(fetcher),
            Arc::new(tracking_fs(present.clone())),
            "/tmp/base",
        );
        cache.acquire().unwrap();
        drop(cache);
        assert!(present.lock().unwrap().is_empty());
    }
}
