use std::cmp::Ordering;

use riots_config::config::Config;
use riots_dl::{github::GithubRelease, traits::ArtifactFetcher};
use riots_store::{CacheInvalidator, ObjectStore};
use riots_utils::version::compare_versions;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    catalog::{Catalog, ReleaseSource},
    index::publish_index,
    invalidate::invalidate,
    materialize::Materializer,
    publish::publish_tree,
    state::is_published,
    SiteResult,
};

/// Which phases of a run to perform. Invalidation always happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub index: bool,
    pub upload: bool,
}

impl SyncOptions {
    pub fn all() -> Self {
        Self {
            index: true,
            upload: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Number of entries on the index page, when it was rendered.
    pub indexed: Option<usize>,
    pub published: Vec<String>,
    /// Versions older than the legacy boundary; those are staged by hand.
    pub below_boundary: Vec<String>,
    /// Versions without exactly one matching archive asset.
    pub skipped: Vec<String>,
    pub invalidation_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReleaseStatus {
    pub version: String,
    pub date: String,
    pub published: bool,
}

/// Where a version sits relative to the legacy boundary.
#[derive(Debug, PartialEq, Eq)]
enum Boundary {
    Reached,
    Below,
    Above,
}

/// Response payload of the event-triggered entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: &'static str,
}

impl Default for EventResponse {
    fn default() -> Self {
        Self {
            status_code: 200,
            body: "ok",
        }
    }
}

/// Publication state of every upstream release, in catalog order.
pub fn release_status(
    source: &dyn ReleaseSource,
    store: &dyn ObjectStore,
) -> SiteResult<Vec<ReleaseStatus>> {
    source
        .fetch_releases()?
        .iter()
        .map(|release| {
            Ok(ReleaseStatus {
                version: release.version().to_string(),
                date: release.date().to_string(),
                published: is_published(store, release.version())?,
            })
        })
        .collect()
}

pub struct Syncer<'a> {
    config: &'a Config,
    source: &'a dyn ReleaseSource,
    fetcher: &'a dyn ArtifactFetcher,
    store: &'a dyn ObjectStore,
    cdn: &'a dyn CacheInvalidator,
}

impl<'a> Syncer<'a> {
    pub fn new(
        config: &'a Config,
        source: &'a dyn ReleaseSource,
        fetcher: &'a dyn ArtifactFetcher,
        store: &'a dyn ObjectStore,
        cdn: &'a dyn CacheInvalidator,
    ) -> Self {
        Self {
            config,
            source,
            fetcher,
            store,
            cdn,
        }
    }

    /// Runs the requested phases: index first, then upload, then invalidation.
    ///
    /// The index reflects publication state from before this run's uploads.
    pub fn run(&self, options: &SyncOptions) -> SiteResult<SyncReport> {
        let older_path = options.index.then(|| self.config.older_releases_path());
        let catalog = Catalog::fetch(self.source, older_path.as_deref())?;

        let mut report = SyncReport::default();

        if options.index {
            let count = publish_index(self.store, self.config, &catalog.releases, &catalog.older)?;
            report.indexed = Some(count);
        }

        if options.upload {
            self.upload(&catalog.releases, &mut report)?;
        }

        report.invalidation_id = invalidate(self.cdn, &self.config.invalidation_paths)?;

        Ok(report)
    }

    fn upload(&self, releases: &[GithubRelease], report: &mut SyncReport) -> SiteResult<()> {
        let materializer = Materializer::new(self.config, self.fetcher);

        for release in releases {
            let version = release.version();

            match self.boundary(version) {
                Boundary::Reached => {
                    info!("{}: legacy boundary reached; older releases are staged by hand", version);
                    break;
                }
                Boundary::Below => {
                    debug!("{}: below legacy boundary, skipping", version);
                    report.below_boundary.push(version.to_string());
                    continue;
                }
                Boundary::Above => {}
            }

            if is_published(self.store, version)? {
                info!("{}: already hosted in bucket", version);
                continue;
            }

            info!("{}: not hosted in bucket; fetching...", version);
            let Some(root) = materializer.materialize(release)? else {
                report.skipped.push(version.to_string());
                continue;
            };

            info!("{}: uploading...", version);
            let summary = publish_tree(self.store, version, &root)?;
            info!(
                "{}: uploaded {} files ({} bytes); now available at {}",
                version,
                summary.files,
                summary.bytes,
                self.config.version_url(version)
            );

            if self.config.cleanup {
                materializer.cleanup(version)?;
            }

            report.published.push(version.to_string());
        }

        Ok(())
    }

    fn boundary(&self, version: &str) -> Boundary {
        let Some(limit) = self.config.legacy_boundary.as_deref() else {
            return Boundary::Above;
        };
        if version == limit {
            return Boundary::Reached;
        }

        match compare_versions(version, limit) {
            Ok(Ordering::Equal) => Boundary::Reached,
            Ok(Ordering::Less) => Boundary::Below,
            Ok(Ordering::Greater) => Boundary::Above,
            Err(err) => {
                debug!("{}: not comparable with {} ({}), processing", version, limit, err);
                Boundary::Above
            }
        }
    }
}
