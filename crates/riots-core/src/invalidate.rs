use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use riots_store::CacheInvalidator;
use tracing::info;

use crate::SiteResult;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A caller reference unique to this request: the current unix time in
/// milliseconds plus a per-process sequence number.
pub fn caller_reference() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("riots-{}-{}", Utc::now().timestamp_millis(), seq)
}

/// Requests invalidation of `paths` and returns the invalidation id.
/// Completion is not awaited.
pub fn invalidate(cdn: &dyn CacheInvalidator, paths: &[String]) -> SiteResult<String> {
    let reference = caller_reference();
    let id = cdn.invalidate(paths, &reference)?;
    info!("Invalidation {} submitted for {}", id, paths.join(", "));
    Ok(id)
}
