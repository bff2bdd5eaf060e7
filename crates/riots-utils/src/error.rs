use std::{error::Error, fmt, path::PathBuf};

use miette::Diagnostic;

#[derive(Debug)]
pub enum FileSystemError {
    File {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    Directory {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    NotADirectory {
        path: PathBuf,
    },

    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::File {
                path,
                action,
                source,
            } => {
                write!(f, "Failed to {action} file `{}`: {source}", path.display())
            }
            FileSystemError::Directory {
                path,
                action,
                source,
            } => {
                write!(
                    f,
                    "Failed to {action} directory `{}`: {source}",
                    path.display()
                )
            }
            FileSystemError::NotADirectory { path } => {
                write!(f, "`{}` is not a directory", path.display())
            }
            FileSystemError::Walk { path, source } => {
                write!(f, "Failed to walk `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for FileSystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileSystemError::File { source, .. } => Some(source),
            FileSystemError::Directory { source, .. } => Some(source),
            FileSystemError::Walk { source, .. } => Some(source),
            FileSystemError::NotADirectory { .. } => None,
        }
    }
}

impl Diagnostic for FileSystemError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("riots_utils::filesystem"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("Check that the working directory is writable"))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum VersionError {
    InvalidComponent { version: String, component: String },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::InvalidComponent { version, component } => {
                write!(
                    f,
                    "Invalid component `{component}` in version `{version}`"
                )
            }
        }
    }
}

impl Error for VersionError {}

impl Diagnostic for VersionError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("riots_utils::version"))
    }
}

#[derive(Debug)]
pub enum UtilsError {
    FileSystem(FileSystemError),
    Version(VersionError),
}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::FileSystem(err) => write!(f, "{err}"),
            UtilsError::Version(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UtilsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UtilsError::FileSystem(err) => Some(err),
            UtilsError::Version(err) => Some(err),
        }
    }
}

impl From<FileSystemError> for UtilsError {
    fn from(err: FileSystemError) -> Self {
        UtilsError::FileSystem(err)
    }
}

impl From<VersionError> for UtilsError {
    fn from(err: VersionError) -> Self {
        UtilsError::Version(err)
    }
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
pub type VersionResult<T> = std::result::Result<T, VersionError>;

pub type UtilsResult<T> = std::result::Result<T, UtilsError>;
