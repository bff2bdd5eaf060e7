use std::sync::Arc;

use aws_sdk_cloudfront::{
    error::DisplayErrorContext,
    types::{InvalidationBatch, Paths},
    Client,
};
use tokio::runtime::Runtime;

use crate::{
    error::{StoreError, StoreResult},
    traits::CacheInvalidator,
};

pub struct CloudFrontInvalidator {
    client: Client,
    distribution_id: String,
    runtime: Arc<Runtime>,
}

impl CloudFrontInvalidator {
    pub(super) fn new(client: Client, distribution_id: String, runtime: Arc<Runtime>) -> Self {
        Self {
            client,
            distribution_id,
            runtime,
        }
    }
}

impl CacheInvalidator for CloudFrontInvalidator {
    fn invalidate(&self, paths: &[String], caller_reference: &str) -> StoreResult<String> {
        let items = Paths::builder()
            .quantity(paths.len() as i32)
            .set_items(Some(paths.to_vec()))
            .build()
            .map_err(|err| StoreError::Build(err.to_string()))?;

        let batch = InvalidationBatch::builder()
            .paths(items)
            .caller_reference(caller_reference)
            .build()
            .map_err(|err| StoreError::Build(err.to_string()))?;

        let output = self
            .runtime
            .block_on(
                self.client
                    .create_invalidation()
                    .distribution_id(&self.distribution_id)
                    .invalidation_batch(batch)
                    .send(),
            )
            .map_err(|err| StoreError::Invalidation {
                distribution: self.distribution_id.clone(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(output
            .invalidation()
            .map(|invalidation| invalidation.id().to_string())
            .unwrap_or_default())
    }
}
