//! Releases that predate the GitHub release API.
//!
//! Their trees were staged in the bucket by hand, so they carry no assets and
//! are always listed on the index.

use std::path::Path;

use riots_utils::fs::read_file;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OlderRelease {
    pub name: String,
    #[serde(default)]
    pub body: String,
    pub date: String,
}

/// Loads the older releases table from a JSON array, preserving file order.
pub fn load_older_releases(path: &Path) -> Result<Vec<OlderRelease>> {
    let content = read_file(path)?;
    serde_json::from_slice(&content).map_err(|source| {
        ConfigError::OlderReleases {
            path: path.to_path_buf(),
            source,
        }
    })
}
