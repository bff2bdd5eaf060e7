use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use riots_utils::fs::ensure_dir_exists;
use tracing::debug;

use crate::{
    error::{DownloadError, Result},
    http_client::HttpClient,
    traits::ArtifactFetcher,
};

pub struct Download<'a> {
    client: &'a HttpClient,
    url: String,
    output: PathBuf,
}

impl<'a> Download<'a> {
    /// Creates a download of `url` into the file at `output`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use riots_dl::{download::Download, http_client::HttpClient};
    ///
    /// let client = HttpClient::default();
    /// let bytes = Download::new(&client, "https://example.com/riot-v1.0.0.tar.gz")
    ///     .output("downloads/1.0.0/1.0.0.tar.gz")
    ///     .execute()
    ///     .unwrap();
    /// ```
    pub fn new(client: &'a HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            output: PathBuf::new(),
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Performs the download and returns the number of bytes written.
    ///
    /// Parent directories of the output are created as needed. The output file is
    /// only created once the server has answered with a success status, so a
    /// failed request never leaves an empty or partial error page behind.
    pub fn execute(self) -> Result<u64> {
        let resp = self.client.get(&self.url).call()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DownloadError::HttpError {
                status: status.as_u16(),
                url: self.url,
            });
        }

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_exists(parent)?;
        }

        let mut file = File::create(&self.output)?;
        let mut reader = resp.into_body().into_reader();
        let written = io::copy(&mut reader, &mut file)?;
        file.flush()?;

        debug!("{}: {} bytes -> {}", self.url, written, self.output.display());

        Ok(written)
    }
}

impl ArtifactFetcher for HttpClient {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        Download::new(self, url).output(dest).execute()
    }
}
