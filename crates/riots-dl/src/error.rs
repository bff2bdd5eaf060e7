use std::path::PathBuf;

use miette::Diagnostic;
use riots_utils::error::FileSystemError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    #[diagnostic(
        code(riots_dl::network),
        help("Check your internet connection or try again later")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("HTTP {status}: {url}")]
    #[diagnostic(
        code(riots_dl::http_error),
        help("A 401 or 403 from the GitHub API usually means the token is missing or expired")
    )]
    HttpError { status: u16, url: String },

    #[error(transparent)]
    #[diagnostic(code(riots_dl::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Invalid response from {url}: {reason}")]
    #[diagnostic(code(riots_dl::invalid_response))]
    InvalidResponse { url: String, reason: String },

    #[error("Failed to extract {}", path.display())]
    #[diagnostic(
        code(riots_dl::extract),
        help("The downloaded archive may be truncated or not a gzipped tarball")
    )]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: compak::error::ArchiveError,
    },
}

pub type Result<T> = std::result::Result<T, DownloadError>;

impl From<ureq::Error> for DownloadError {
    fn from(e: ureq::Error) -> Self {
        Self::Network(Box::new(e))
    }
}
