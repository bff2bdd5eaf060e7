use std::path::Path;

use crate::error::DownloadError;

/// Fetches a remote artifact into a local file.
pub trait ArtifactFetcher {
    /// Downloads `url` to `dest`, returning the number of bytes written.
    ///
    /// `dest` must not be created unless the server answered with a success status.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}
