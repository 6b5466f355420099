//! Template repository fetchers.

mod archive;
mod github;
mod local;

pub use archive::unpack_tarball;
pub use github::{DEFAULT_REFERENCE, DEFAULT_REPOSITORY, GithubTarballFetcher};
pub use local::LocalDirectoryFetcher;

use honest_core::{application::ApplicationError, error::HonestError};
use thiserror::Error;

/// Failures while obtaining the template repository.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("archive entry escapes the destination: {0}")]
    UnsafeEntry(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template source {0} does not exist")]
    MissingSource(String),
}

impl FetchError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<FetchError> for HonestError {
    fn from(e: FetchError) -> Self {
        ApplicationError::FetchFailed {
            reason: e.to_string(),
        }
        .into()
    }
}
