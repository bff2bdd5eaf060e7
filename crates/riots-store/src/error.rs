use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("Failed to check whether `{key}` exists: {message}")]
    #[diagnostic(
        code(riots_store::lookup),
        help("Only a not-found answer counts as unpublished; check bucket permissions and connectivity")
    )]
    Lookup { key: String, message: String },

    #[error("Failed to upload `{key}`: {message}")]
    #[diagnostic(code(riots_store::put))]
    Put { key: String, message: String },

    #[error("Failed to invalidate distribution `{distribution}`: {message}")]
    #[diagnostic(code(riots_store::invalidation))]
    Invalidation {
        distribution: String,
        message: String,
    },

    #[error("Invalid request: {0}")]
    #[diagnostic(code(riots_store::build))]
    Build(String),

    #[error("Failed to start the async runtime")]
    #[diagnostic(code(riots_store::runtime))]
    Runtime(#[source] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
