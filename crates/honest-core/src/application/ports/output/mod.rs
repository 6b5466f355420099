//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `honest-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::HonestResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `honest_adapters::filesystem::LocalFilesystem` (production)
/// - `honest_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HonestResult<()>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> HonestResult<()>;

    fn read_to_string(&self, path: &Path) -> HonestResult<String>;

    /// Byte-for-byte copy, creating parent directories of `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> HonestResult<()>;

    /// Recursively copy the contents of `from` into `to`.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> HonestResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Every regular file below `dir`, as absolute paths, sorted.
    fn list_files(&self, dir: &Path) -> HonestResult<Vec<PathBuf>>;

    fn remove_file(&self, path: &Path) -> HonestResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HonestResult<()>;
}

/// Port for obtaining the template repository.
///
/// Implemented by:
/// - `honest_adapters::fetcher::GithubTarballFetcher` (download)
/// - `honest_adapters::fetcher::LocalDirectoryFetcher` (local checkout)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Materialise the repository contents into `dest` (which may not exist yet).
    fn fetch(&self, dest: &Path) -> HonestResult<()>;

    /// Human readable source, e.g. `honestjs/templates#main`.
    fn describe(&self) -> String;
}

/// Port for running external programs (`git`, package managers).
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program args…` in `cwd`.
    ///
    /// With `inherit_stdio` the child shares the terminal; otherwise its
    /// output is discarded. A non-zero exit is an error.
    fn run(&self, program: &str, args: &[String], cwd: &Path, inherit_stdio: bool) -> HonestResult<()>;
}
