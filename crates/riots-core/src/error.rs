//! Error types for riots-core.

use std::path::PathBuf;

use miette::Diagnostic;
use riots_config::error::ConfigError;
use riots_dl::error::DownloadError;
use riots_store::StoreError;
use riots_utils::error::FileSystemError;
use thiserror::Error;

/// Error type for a mirror run.
#[derive(Error, Diagnostic, Debug)]
pub enum SiteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("{version}: extraction failed")]
    #[diagnostic(
        code(riots::extraction_failed),
        help("Delete the downloaded archive and run again")
    )]
    ExtractionFailed {
        version: String,
        #[source]
        source: DownloadError,
    },

    #[error("{version}: archive extracted to {} contains nothing", path.display())]
    #[diagnostic(code(riots::empty_archive))]
    EmptyArchive { version: String, path: PathBuf },

    #[error("{version}: config source {} does not exist", path.display())]
    #[diagnostic(
        code(riots::missing_config),
        help("Releases ship config.sample.json; releases without one need `special_config_path`")
    )]
    MissingConfig { version: String, path: PathBuf },

    #[error("Failed to parse template {name}")]
    #[diagnostic(code(riots::template_parse))]
    TemplateParse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render template {name}")]
    #[diagnostic(
        code(riots::template_render),
        help("Templates are rendered strictly: every referenced field must exist in the data")
    )]
    TemplateRender {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
