use crate::error::StoreResult;

/// Options attached to a single object upload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: Option<String>,
    pub public_read: bool,
}

impl PutOptions {
    /// A world-readable object with the given content type.
    pub fn public(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            public_read: true,
        }
    }
}

/// A key/value blob store with path-like keys.
pub trait ObjectStore {
    /// Whether an object exists at `key`.
    ///
    /// A missing object is `Ok(false)`; every other failure is an error.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Writes `body` at `key`, replacing any existing object.
    fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StoreResult<()>;
}

/// A CDN able to drop cached copies of a set of paths.
pub trait CacheInvalidator {
    /// Submits an invalidation for `paths` and returns the provider's request id.
    ///
    /// `caller_reference` must be unique per request. Completion is not awaited.
    fn invalidate(&self, paths: &[String], caller_reference: &str) -> StoreResult<String>;
}
