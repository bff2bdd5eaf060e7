use std::path::Path;

use riots_store::{ObjectStore, PutOptions};
use riots_utils::fs::{read_file, walk_files};
use tracing::debug;

use crate::{state::marker_key, SiteResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub files: usize,
    pub bytes: u64,
}

/// Guesses a content type from the file name.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// Destination key of `file`: the `root` prefix replaced by `version`.
pub fn object_key(version: &str, root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut key = version.to_string();
    for component in relative.components() {
        key.push('/');
        key.push_str(&component.as_os_str().to_string_lossy());
    }
    key
}

/// Uploads every file under `root` below `<version>/`, then writes the
/// version's marker.
///
/// Files go up in path order. The marker is only written once all of them
/// succeeded, so an interrupted run leaves the version unpublished.
pub fn publish_tree(store: &dyn ObjectStore, version: &str, root: &Path) -> SiteResult<PublishSummary> {
    let mut summary = PublishSummary::default();

    for file in walk_files(root)? {
        let key = object_key(version, root, &file);
        let content_type = content_type_for(&file);
        let body = read_file(&file)?;
        let size = body.len() as u64;

        debug!("{} ({}, {} bytes)", key, content_type, size);
        store.put(&key, body, &PutOptions::public(content_type))?;

        summary.files += 1;
        summary.bytes += size;
    }

    store.put(&marker_key(version), Vec::new(), &PutOptions::default())?;

    Ok(summary)
}
