use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use riots_utils::{time::parse_duration, version::compare_versions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

pub const CONFIG_ENV: &str = "RIOTS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "riots.toml";

/// Mirror configuration, read from `riots.toml`.
///
/// Every key is optional in the file; missing keys take the values of
/// [`Config::default`]. Credentials are never read from here.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Owner of the repository whose releases are mirrored.
    pub owner: String,

    /// Name of the repository whose releases are mirrored.
    pub repo: String,

    /// Base URL of the GitHub REST API.
    pub api_base: String,

    /// AWS region of the destination bucket.
    pub region: String,

    /// Scratch directory holding `downloads/` and `exploded/`.
    pub work_dir: PathBuf,

    /// Directory containing the index template, static assets and older releases data.
    pub site_dir: PathBuf,

    /// Index template file name, relative to `site_dir`.
    pub template: String,

    /// Older releases JSON data file, relative to `site_dir`.
    pub older_releases: String,

    /// Suffix identifying the release asset to mirror.
    pub archive_extension: String,

    /// Version at which the upload walk stops. Releases at or below it are
    /// expected to be staged by hand. `false` in the file disables the check.
    #[serde(with = "disableable")]
    pub legacy_boundary: Option<String>,

    /// Version released without `config.sample.json`.
    pub special_config_version: String,

    /// Config file injected into `special_config_version` instead of the sample.
    pub special_config_path: PathBuf,

    /// Object key of the rendered index page.
    pub index_key: String,

    /// Files copied verbatim from `site_dir` to the bucket root.
    pub static_assets: Vec<String>,

    /// CDN paths invalidated at the end of every run.
    pub invalidation_paths: Vec<String>,

    /// Public URL of the mirror, used in log output.
    pub public_url: String,

    /// User agent sent with every HTTP request.
    pub user_agent: String,

    /// Global HTTP timeout, e.g. `5m` or `90s`. `false` in the file disables it.
    #[serde(with = "disableable")]
    pub http_timeout: Option<String>,

    /// Remove per-version download and extraction directories after publishing.
    pub cleanup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: "vector-im".to_string(),
            repo: "riot-web".to_string(),
            api_base: "https://api.github.com".to_string(),
            region: "us-east-1".to_string(),
            work_dir: PathBuf::from("work"),
            site_dir: PathBuf::from("site"),
            template: "index.hbs".to_string(),
            older_releases: "older_releases.json".to_string(),
            archive_extension: ".tar.gz".to_string(),
            legacy_boundary: Some("0.7.3".to_string()),
            special_config_version: "0.9.0".to_string(),
            special_config_path: PathBuf::from("patches/config.0.9.0.json"),
            index_key: "index.html".to_string(),
            static_assets: vec!["style.css".to_string(), "privacy.html".to_string()],
            invalidation_paths: vec!["/".to_string(), "/index.html".to_string()],
            public_url: "https://riots.im".to_string(),
            user_agent: concat!("riots/", env!("CARGO_PKG_VERSION")).to_string(),
            http_timeout: Some("5m".to_string()),
            cleanup: true,
        }
    }
}

/// A string setting that can be switched off with `false`.
///
/// TOML has no null, so `None` is written as `false` and read back from it.
mod disableable {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Setting {
        Switch(bool),
        Value(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(value),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Setting::deserialize(deserializer)? {
            Setting::Value(value) => Ok(Some(value)),
            Setting::Switch(false) => Ok(None),
            Setting::Switch(true) => Err(D::Error::custom(
                "expected a string, or `false` to disable",
            )),
        }
    }
}

/// Resolves the configuration file path: an explicit path wins, then
/// `RIOTS_CONFIG`, then `./riots.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

impl Config {
    /// Loads the configuration from `path`.
    /// If the file is not found, the default configuration is used.
    pub fn load(path: &Path) -> Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "owner",
                reason: "must not be empty".to_string(),
            });
        }
        if self.repo.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "repo",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.archive_extension.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                field: "archive_extension",
                reason: format!("`{}` must start with a dot", self.archive_extension),
            });
        }
        if self.invalidation_paths.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "invalidation_paths",
                reason: "at least one path is required".to_string(),
            });
        }
        if let Some(path) = self.invalidation_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::InvalidValue {
                field: "invalidation_paths",
                reason: format!("`{path}` must start with '/'"),
            });
        }
        if let Some(boundary) = &self.legacy_boundary {
            if let Err(err) = compare_versions(boundary, boundary) {
                return Err(ConfigError::InvalidValue {
                    field: "legacy_boundary",
                    reason: format!("{err}; use `false` to disable the boundary"),
                });
            }
        }
        if let Some(timeout) = &self.http_timeout {
            if parse_duration(timeout).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "http_timeout",
                    reason: format!(
                        "`{timeout}` is not a duration like `30s` or `5m`; use `false` to disable"
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn template_path(&self) -> PathBuf {
        self.site_dir.join(&self.template)
    }

    pub fn older_releases_path(&self) -> PathBuf {
        self.site_dir.join(&self.older_releases)
    }

    pub fn downloads_dir(&self, version: &str) -> PathBuf {
        self.work_dir.join("downloads").join(version)
    }

    pub fn exploded_dir(&self, version: &str) -> PathBuf {
        self.work_dir.join("exploded").join(version)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout.as_deref().and_then(parse_duration)
    }

    pub fn version_url(&self, version: &str) -> String {
        format!("{}/{}", self.public_url.trim_end_matches('/'), version)
    }
}

/// Writes the default configuration to `path`, refusing to overwrite an existing file.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists(path.to_path_buf()));
    }

    let serialized = toml::to_string_pretty(&Config::default())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialized)?;

    info!("Default configuration written to {}", path.display());
    Ok(())
}
