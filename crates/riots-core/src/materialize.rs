use std::path::{Path, PathBuf};

use riots_config::config::Config;
use riots_dl::{
    extract::extract_archive,
    github::{GithubAsset, GithubRelease},
    traits::ArtifactFetcher,
};
use riots_utils::fs::{copy_file, first_entry, safe_remove};
use tracing::{debug, info, warn};

use crate::{error::SiteError, SiteResult};

const CONFIG_FILE: &str = "config.json";
const SAMPLE_CONFIG_FILE: &str = "config.sample.json";

/// Picks the single asset whose name ends with `extension`.
///
/// Returns `None` when no asset or more than one asset matches.
pub fn select_archive<'a>(assets: &'a [GithubAsset], extension: &str) -> Option<&'a GithubAsset> {
    let mut matching = assets.iter().filter(|a| a.name.ends_with(extension));
    let first = matching.next()?;
    match matching.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Locates the top-level directory an archive was extracted into.
///
/// Its name is not assumed; the first entry of `exploded` is taken.
pub fn locate_tree_root(version: &str, exploded: &Path) -> SiteResult<PathBuf> {
    first_entry(exploded)?.ok_or_else(|| SiteError::EmptyArchive {
        version: version.to_string(),
        path: exploded.to_path_buf(),
    })
}

/// Turns a release into a local tree ready to publish.
pub struct Materializer<'a> {
    config: &'a Config,
    fetcher: &'a dyn ArtifactFetcher,
}

impl<'a> Materializer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a dyn ArtifactFetcher) -> Self {
        Self { config, fetcher }
    }

    /// Downloads, extracts and configures `release`.
    ///
    /// Returns `Ok(None)` when the release has no unambiguous archive asset;
    /// nothing is downloaded in that case.
    pub fn materialize(&self, release: &GithubRelease) -> SiteResult<Option<PathBuf>> {
        let version = release.version();
        let extension = &self.config.archive_extension;

        let Some(asset) = select_archive(&release.assets, extension) else {
            warn!(
                "{}: no unambiguous {} asset among {} assets; skipping",
                version,
                extension,
                release.assets.len()
            );
            return Ok(None);
        };

        let archive = self
            .config
            .downloads_dir(version)
            .join(format!("{version}{extension}"));
        let bytes = self.fetcher.fetch(&asset.browser_download_url, &archive)?;
        info!("{}: tarball downloaded ({} bytes); exploding...", version, bytes);

        let exploded = self.config.exploded_dir(version);
        safe_remove(&exploded)?;
        extract_archive(&archive, &exploded).map_err(|source| SiteError::ExtractionFailed {
            version: version.to_string(),
            source,
        })?;

        let root = locate_tree_root(version, &exploded)?;
        debug!("{}: tree root {}", version, root.display());

        self.inject_config(version, &root)?;
        info!("{}: config inserted", version);

        Ok(Some(root))
    }

    /// Writes `config.json` into `root`.
    ///
    /// The sample config shipped in the archive is used, except for the
    /// configured special version which gets the external file instead.
    pub fn inject_config(&self, version: &str, root: &Path) -> SiteResult<()> {
        let source = if version == self.config.special_config_version {
            self.config.special_config_path.clone()
        } else {
            root.join(SAMPLE_CONFIG_FILE)
        };

        if !source.is_file() {
            return Err(SiteError::MissingConfig {
                version: version.to_string(),
                path: source,
            });
        }

        copy_file(&source, root.join(CONFIG_FILE))?;
        Ok(())
    }

    /// Removes the download and extraction directories of `version`.
    pub fn cleanup(&self, version: &str) -> SiteResult<()> {
        safe_remove(self.config.downloads_dir(version))?;
        safe_remove(self.config.exploded_dir(version))?;
        Ok(())
    }
}
