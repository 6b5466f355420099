//! Infrastructure adapters for honestjs.
//!
//! This crate implements the ports defined in `honest-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use fetcher::{
    DEFAULT_REFERENCE, DEFAULT_REPOSITORY, GithubTarballFetcher, LocalDirectoryFetcher,
};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemCommandRunner;
