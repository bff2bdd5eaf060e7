//! S3 and CloudFront backends.
//!
//! The AWS SDK is async; each backend blocks on a shared current-thread runtime
//! so callers stay synchronous and never have two requests in flight.

use std::{fmt, sync::Arc};

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

mod cloudfront;
mod s3;

pub use cloudfront::CloudFrontInvalidator;
pub use s3::S3Store;

#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Resolved SDK configuration plus the runtime that drives it.
pub struct AwsSession {
    runtime: Arc<Runtime>,
    config: SdkConfig,
}

impl AwsSession {
    pub fn new(credentials: &AwsCredentials, region: &str) -> StoreResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        let provider = Credentials::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            None,
            None,
            "riots",
        );

        let config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .credentials_provider(provider)
                .load(),
        );
        debug!("AWS session ready for region {}", region);

        Ok(Self {
            runtime: Arc::new(runtime),
            config,
        })
    }

    pub fn s3(&self, bucket: impl Into<String>) -> S3Store {
        S3Store::new(
            aws_sdk_s3::Client::new(&self.config),
            bucket.into(),
            Arc::clone(&self.runtime),
        )
    }

    pub fn cloudfront(&self, distribution_id: impl Into<String>) -> CloudFrontInvalidator {
        CloudFrontInvalidator::new(
            aws_sdk_cloudfront::Client::new(&self.config),
            distribution_id.into(),
            Arc::clone(&self.runtime),
        )
    }
}
