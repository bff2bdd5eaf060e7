use std::{
    cell::RefCell,
    collections::HashMap,
    fs::{self, File},
    path::{Path, PathBuf},
};

use flate2::{write::GzEncoder, Compression};
use riots_config::config::Config;
use riots_dl::{
    error::{DownloadError, Result as DownloadResult},
    github::{GithubAsset, GithubRelease},
    traits::ArtifactFetcher,
};

pub const TEMPLATE: &str =
    "<ul>{{#each releases}}<li><h2>{{name}}</h2><em>{{date}}</em>{{{body}}}</li>{{/each}}</ul>";

pub fn asset(name: &str) -> GithubAsset {
    GithubAsset {
        name: name.to_string(),
        size: 0,
        browser_download_url: format!("https://github.test/download/{name}"),
    }
}

pub fn release(tag: &str, body: Option<&str>, assets: Vec<GithubAsset>) -> GithubRelease {
    GithubRelease {
        tag_name: tag.to_string(),
        name: Some(tag.to_string()),
        body: body.map(str::to_string),
        created_at: "2019-05-02T10:00:00Z".to_string(),
        assets,
    }
}

/// A release with the usual `riot-<tag>.tar.gz` asset.
pub fn release_with_archive(tag: &str) -> GithubRelease {
    release(tag, None, vec![asset(&format!("riot-{tag}.tar.gz"))])
}

/// Writes a gzipped tarball holding `entries` (path, contents).
pub fn write_tarball(path: &Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *contents).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// An [`ArtifactFetcher`] serving local files and recording requested urls.
#[derive(Default)]
pub struct FixtureFetcher {
    files: HashMap<String, PathBuf>,
    calls: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn add(&mut self, url: &str, file: PathBuf) {
        self.files.insert(url.to_string(), file);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ArtifactFetcher for FixtureFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> DownloadResult<u64> {
        self.calls.borrow_mut().push(url.to_string());
        let Some(source) = self.files.get(url) else {
            return Err(DownloadError::HttpError {
                status: 404,
                url: url.to_string(),
            });
        };
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        Ok(fs::copy(source, dest)?)
    }
}

/// A config whose directories all live under `root`, with a populated site dir.
pub fn site_config(root: &Path) -> Config {
    let site = root.join("site");
    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("index.hbs"), TEMPLATE).unwrap();
    fs::write(site.join("style.css"), "body { margin: 0; }").unwrap();
    fs::write(site.join("privacy.html"), "<p>privacy</p>").unwrap();
    fs::write(
        site.join("older_releases.json"),
        r#"[{"name": "0.7.3", "body": "", "date": "2016-06-03"}]"#,
    )
    .unwrap();

    let special = root.join("patches").join("config.0.9.0.json");
    fs::create_dir_all(special.parent().unwrap()).unwrap();
    fs::write(&special, br#"{"default_hs_url": "https://matrix.org"}"#).unwrap();

    Config {
        work_dir: root.join("work"),
        site_dir: site,
        special_config_path: special,
        ..Config::default()
    }
}
