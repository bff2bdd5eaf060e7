use std::path::PathBuf;

use miette::Diagnostic;
use riots_utils::error::{FileSystemError, UtilsError};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(riots_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(riots_config::toml_deserialize),
        help("Check your riots.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists: {}", .0.display())]
    #[diagnostic(
        code(riots_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists(PathBuf),

    #[error("Invalid value for `{field}`: {reason}")]
    #[diagnostic(code(riots_config::invalid_value))]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to parse older releases file {}", path.display())]
    #[diagnostic(
        code(riots_config::older_releases),
        help("The file must be a JSON array of {{\"name\", \"date\"}} objects")
    )]
    OlderReleases {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(riots_config::io))]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(riots_config::utils))]
    Utils(#[from] UtilsError),
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
