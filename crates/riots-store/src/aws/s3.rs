use std::sync::Arc;

use aws_sdk_s3::{
    error::DisplayErrorContext, primitives::ByteStream, types::ObjectCannedAcl, Client,
};
use tokio::runtime::Runtime;
use tracing::trace;

use crate::{
    error::{StoreError, StoreResult},
    traits::{ObjectStore, PutOptions},
};

pub struct S3Store {
    client: Client,
    bucket: String,
    runtime: Arc<Runtime>,
}

impl S3Store {
    pub(super) fn new(client: Client, bucket: String, runtime: Arc<Runtime>) -> Self {
        Self {
            client,
            bucket,
            runtime,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3Store {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        let result = self.runtime.block_on(
            self.client
                .head_object()
                .bucket(&self.bucket)
                .key(key)
                .send(),
        );

        match result {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => {
                trace!("s3://{}/{} not found", self.bucket, key);
                Ok(false)
            }
            Err(err) => Err(StoreError::Lookup {
                key: key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            }),
        }
    }

    fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StoreResult<()> {
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body));

        if let Some(content_type) = &options.content_type {
            req = req.content_type(content_type);
        }
        if options.public_read {
            req = req.acl(ObjectCannedAcl::PublicRead);
        }

        self.runtime
            .block_on(req.send())
            .map_err(|err| StoreError::Put {
                key: key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(())
    }
}
