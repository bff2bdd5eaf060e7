//! The index page: one entry per published release, newest first, followed
//! by the older releases table.

use std::path::Path;

use comrak::{markdown_to_html, Options};
use handlebars::Handlebars;
use riots_config::{config::Config, older::OlderRelease};
use riots_dl::github::GithubRelease;
use riots_store::{ObjectStore, PutOptions};
use riots_utils::fs::read_file;
use serde::Serialize;
use tracing::{debug, info};

use crate::{error::SiteError, publish::content_type_for, state::is_published, SiteResult};

const TEMPLATE_NAME: &str = "index";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub name: String,
    /// Changelog as HTML.
    pub body: String,
    pub date: String,
}

impl From<&OlderRelease> for IndexEntry {
    fn from(release: &OlderRelease) -> Self {
        Self {
            name: release.name.clone(),
            body: release.body.clone(),
            date: release.date.clone(),
        }
    }
}

/// Renders a GitHub-flavoured markdown changelog. An absent body is `""`.
pub fn render_markdown(body: Option<&str>) -> String {
    let Some(body) = body else {
        return String::new();
    };

    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    markdown_to_html(body, &options)
}

/// Builds the index entries: published modern releases in catalog order,
/// then every older release.
pub fn build_entries(
    store: &dyn ObjectStore,
    releases: &[GithubRelease],
    older: &[OlderRelease],
) -> SiteResult<Vec<IndexEntry>> {
    let mut entries = Vec::with_capacity(releases.len() + older.len());

    for release in releases {
        if !is_published(store, release.version())? {
            debug!("{}: not published, left off the index", release.version());
            continue;
        }
        entries.push(IndexEntry {
            name: release.display_name().to_string(),
            body: render_markdown(release.body()),
            date: release.date().to_string(),
        });
    }

    entries.extend(older.iter().map(IndexEntry::from));
    Ok(entries)
}

#[derive(Serialize)]
struct IndexContext<'a> {
    releases: &'a [IndexEntry],
}

/// Strict handlebars renderer for the index template.
///
/// Referencing a field the data does not carry is an error, not an empty string.
pub struct IndexRenderer {
    registry: Handlebars<'static>,
}

impl IndexRenderer {
    pub fn new(template: &str) -> SiteResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|err| SiteError::TemplateParse {
                name: TEMPLATE_NAME.to_string(),
                source: Box::new(err),
            })?;
        Ok(Self { registry })
    }

    pub fn from_file(path: &Path) -> SiteResult<Self> {
        let content = read_file(path)?;
        Self::new(&String::from_utf8_lossy(&content))
    }

    pub fn render(&self, entries: &[IndexEntry]) -> SiteResult<String> {
        self.registry
            .render(TEMPLATE_NAME, &IndexContext { releases: entries })
            .map_err(|err| SiteError::TemplateRender {
                name: TEMPLATE_NAME.to_string(),
                source: Box::new(err),
            })
    }
}

/// Renders and uploads the index page, then the static site assets.
///
/// Returns the number of entries on the page.
pub fn publish_index(
    store: &dyn ObjectStore,
    config: &Config,
    releases: &[GithubRelease],
    older: &[OlderRelease],
) -> SiteResult<usize> {
    let renderer = IndexRenderer::from_file(&config.template_path())?;
    let entries = build_entries(store, releases, older)?;
    let rendered = renderer.render(&entries)?;

    store.put(
        &config.index_key,
        rendered.into_bytes(),
        &PutOptions::public("text/html"),
    )?;
    info!("{} written with {} releases", config.index_key, entries.len());

    publish_static_assets(store, &config.site_dir, &config.static_assets)?;

    Ok(entries.len())
}

/// Copies each of `assets` from `site_dir` to the bucket root.
pub fn publish_static_assets(
    store: &dyn ObjectStore,
    site_dir: &Path,
    assets: &[String],
) -> SiteResult<()> {
    for asset in assets {
        let source = site_dir.join(asset);
        let body = read_file(&source)?;
        store.put(asset, body, &PutOptions::public(content_type_for(&source)))?;
        debug!("{} uploaded", asset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use riots_store::MemoryStore;
    use tempfile::tempdir;

    use super::*;
    use crate::test_utils::{release, site_config, TEMPLATE};

    fn mark(store: &MemoryStore, version: &str) {
        store
            .put(&format!("{version}/"), Vec::new(), &PutOptions::default())
            .unwrap();
    }

    #[test]
    fn test_render_markdown() {
        assert_eq!(render_markdown(None), "");

        let list = render_markdown(Some("* fixed ~~bug~~"));
        assert!(list.contains("<li>fixed <del>bug</del></li>"));

        let table = render_markdown(Some("| a | b |\n|---|---|\n| 1 | 2 |"));
        assert!(table.contains("<table>"));

        let link = render_markdown(Some("see https://riot.im"));
        assert!(link.contains("<a href=\"https://riot.im\">"));
    }

    #[test]
    fn test_render_markdown_escapes_raw_html() {
        let html = render_markdown(Some("<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_build_entries_filters_unpublished() {
        let store = MemoryStore::new();
        mark(&store, "1.0.0");
        mark(&store, "1.1.0");

        let releases = vec![
            release("v1.0.0", Some("first"), vec![]),
            release("v1.1.0", None, vec![]),
            release("v1.2.0", Some("third"), vec![]),
        ];
        let older = vec![OlderRelease {
            name: "0.7.3".to_string(),
            body: String::new(),
            date: "2016-06-03".to_string(),
        }];

        let entries = build_entries(&store, &releases, &older).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["1.0.0", "1.1.0", "0.7.3"]);

        assert_eq!(entries[0].body, "<p>first</p>\n");
        assert_eq!(entries[1].body, "");
        assert_eq!(entries[0].date, "2019-05-02");
    }

    #[test]
    fn test_renderer_strict_mode_rejects_missing_field() {
        let renderer = IndexRenderer::new("{{#each releases}}{{version}}{{/each}}").unwrap();
        let entries = vec![IndexEntry {
            name: "1.0.0".to_string(),
            body: String::new(),
            date: "2019-02-14".to_string(),
        }];
        assert!(matches!(
            renderer.render(&entries),
            Err(SiteError::TemplateRender { .. })
        ));
    }

    #[test]
    fn test_renderer_rejects_malformed_template() {
        assert!(matches!(
            IndexRenderer::new("{{#each releases}}"),
            Err(SiteError::TemplateParse { .. })
        ));
    }

    #[test]
    fn test_renderer_keeps_body_html() {
        let renderer = IndexRenderer::new(TEMPLATE).unwrap();
        let entries = vec![IndexEntry {
            name: "1.0.0 <beta>".to_string(),
            body: "<p>notes</p>".to_string(),
            date: "2019-02-14".to_string(),
        }];
        let html = renderer.render(&entries).unwrap();
        assert!(html.contains("<p>notes</p>"));
        assert!(html.contains("1.0.0 &lt;beta&gt;"));
    }

    #[test]
    fn test_publish_index_uploads_page_and_assets() {
        let dir = tempdir().unwrap();
        let config = site_config(dir.path());
        let store = MemoryStore::new();
        mark(&store, "1.0.0");

        let releases = vec![release("v1.0.0", Some("hello"), vec![])];
        let older: Vec<OlderRelease> = vec![];
        let count = publish_index(&store, &config, &releases, &older).unwrap();
        assert_eq!(count, 1);

        let index = store.get("index.html").unwrap();
        assert_eq!(index.options, PutOptions::public("text/html"));
        let html = String::from_utf8(index.body).unwrap();
        assert!(html.contains("<h2>1.0.0</h2>"));
        assert!(html.contains("<p>hello</p>"));

        assert_eq!(
            store.get("style.css").unwrap().options,
            PutOptions::public("text/css")
        );
        assert_eq!(
            store.get("privacy.html").unwrap().body,
            fs::read(config.site_dir.join("privacy.html")).unwrap()
        );
    }

    #[test]
    fn test_publish_index_missing_asset_fails() {
        let dir = tempdir().unwrap();
        let mut config = site_config(dir.path());
        config.static_assets.push("favicon.ico".to_string());

        let store = MemoryStore::new();
        assert!(matches!(
            publish_index(&store, &config, &[], &[]),
            Err(SiteError::FileSystem(_))
        ));
    }
}
