//! Publication state lives in the bucket itself: a version is published
//! exactly when its `<version>/` marker object exists.

use riots_store::ObjectStore;
use tracing::trace;

use crate::SiteResult;

pub fn marker_key(version: &str) -> String {
    format!("{version}/")
}

/// Whether `version` has been fully published.
///
/// Only a definite not-found answer yields `false`; any other failure to
/// reach the store is returned as an error.
pub fn is_published(store: &dyn ObjectStore, version: &str) -> SiteResult<bool> {
    let key = marker_key(version);
    let published = store.exists(&key)?;
    trace!("{}: published={}", key, published);
    Ok(published)
}
