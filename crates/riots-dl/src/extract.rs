use std::path::Path;

use riots_utils::fs::ensure_dir_exists;
use tracing::debug;

use crate::error::{DownloadError, Result};

/// Unpacks `archive` into `dest`, creating `dest` if needed.
///
/// Any failure of the extractor is reported as [`DownloadError::ExtractionFailed`]
/// at this point rather than surfacing later as missing files.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    ensure_dir_exists(dest)?;

    compak::extract_archive(archive, dest).map_err(|source| {
        DownloadError::ExtractionFailed {
            path: archive.to_path_buf(),
            source,
        }
    })?;

    debug!("extracted {} into {}", archive.display(), dest.display());
    Ok(())
}
