//! Download the template repository as a GitHub tarball.

use std::path::Path;
use std::time::Duration;

use honest_core::{application::ports::TemplateFetcher, error::HonestResult};
use reqwest::blocking::Client;
use tracing::{info, instrument};

use super::{FetchError, unpack_tarball};

pub const DEFAULT_REPOSITORY: &str = "honestjs/templates";
pub const DEFAULT_REFERENCE: &str = "main";

/// Fetches `https://codeload.github.com/<repository>/tar.gz/<reference>`.
#[derive(Debug, Clone)]
pub struct GithubTarballFetcher {
    repository: String,
    reference: String,
    base_url: String,
    timeout: Duration,
}

impl GithubTarballFetcher {
    pub fn new(repository: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            reference: reference.into(),
            base_url: "https://codeload.github.com".into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Point at another host serving the same URL layout (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}/tar.gz/{}",
            self.base_url, self.repository, self.reference
        )
    }

    fn download(&self, dest: &Path) -> Result<usize, FetchError> {
        let client = Client::builder()
            .user_agent(format!("honestjs-cli/{}", honest_core::VERSION))
            .timeout(self.timeout)
            .build()?;

        let url = self.url();
        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        unpack_tarball(response, dest)
    }
}

impl Default for GithubTarballFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY, DEFAULT_REFERENCE)
    }
}

impl TemplateFetcher for GithubTarballFetcher {
    #[instrument(skip(self), fields(url = %self.url()))]
    fn fetch(&self, dest: &Path) -> HonestResult<()> {
        let files = self.download(dest)?;
        info!(files, dest = %dest.display(), "Downloaded template repository");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}#{}", self.repository, self.reference)
    }
}
