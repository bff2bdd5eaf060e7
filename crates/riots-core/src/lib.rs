use error::SiteError;

pub mod catalog;
pub mod error;
pub mod index;
pub mod invalidate;
pub mod materialize;
pub mod publish;
pub mod state;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_utils;

pub type SiteResult<T> = std::result::Result<T, SiteError>;
