use crate::core::{ObjectStore, UploadReceipt};
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_file(&self, source: &Path, bucket: &str, key: &str) -> Result<UploadReceipt> {
        // Path-backed body: the SDK reads the file as it sends instead of buffering it whole.
        let body = ByteStream::from_path(source)
            .await
            .map_err(|e| PipelineError::UploadError {
                message: format!("cannot open {}: {}", source.display(), e),
            })?;
        let bytes = body.size_hint().0;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/csv")
            .body(body)
            .send()
            .await
            .map_err(|e| PipelineError::UploadError {
                message: format!(
                    "PutObject s3://{}/{} failed: {}",
                    bucket,
                    key,
                    DisplayErrorContext(&e)
                ),
            })?;

        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
        })
    }
}
