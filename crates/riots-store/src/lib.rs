//! Destination backends for the mirror.
//!
//! [`ObjectStore`] and [`CacheInvalidator`] are the seams the publishing code is
//! written against. The S3 and CloudFront implementations live behind the `aws`
//! feature; the in-memory ones are always available.

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "aws")]
pub mod aws;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryInvalidator, MemoryStore};
pub use traits::{CacheInvalidator, ObjectStore, PutOptions};
