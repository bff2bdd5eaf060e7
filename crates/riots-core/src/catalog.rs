//! The release catalog: what upstream has published plus the hand-curated
//! releases that predate the release API.

use std::path::Path;

use riots_config::older::{load_older_releases, OlderRelease};
use riots_dl::github::{Github, GithubRelease};
use tracing::{debug, info};

use crate::SiteResult;

/// Anything that can list upstream releases, newest first.
pub trait ReleaseSource {
    fn fetch_releases(&self) -> SiteResult<Vec<GithubRelease>>;
}

/// Releases of one GitHub repository.
pub struct GithubSource {
    github: Github,
    owner: String,
    repo: String,
}

impl GithubSource {
    pub fn new(github: Github, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            github,
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl ReleaseSource for GithubSource {
    fn fetch_releases(&self) -> SiteResult<Vec<GithubRelease>> {
        info!("Fetching releases of {}/{}", self.owner, self.repo);
        Ok(self.github.fetch_releases(&self.owner, &self.repo)?)
    }
}

impl ReleaseSource for Vec<GithubRelease> {
    fn fetch_releases(&self) -> SiteResult<Vec<GithubRelease>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub releases: Vec<GithubRelease>,
    pub older: Vec<OlderRelease>,
}

impl Catalog {
    /// Fetches the upstream releases and, when `older_path` is given, loads the
    /// older releases table appended after them on the index.
    pub fn fetch(source: &dyn ReleaseSource, older_path: Option<&Path>) -> SiteResult<Self> {
        let releases = source.fetch_releases()?;
        debug!("{} upstream releases", releases.len());

        let older = match older_path {
            Some(path) => load_older_releases(path)?,
            None => Vec::new(),
        };

        Ok(Self { releases, older })
    }
}
