use crate::core::{ObjectStore, UploadReceipt};
use crate::utils::error::{PipelineError, Result};
use std::path::Path;

pub struct Uploader<O: ObjectStore> {
    store: O,
}

impl<O: ObjectStore> Uploader<O> {
    pub fn new(store: O) -> Self {
        Self { store }
    }

    /// Copies the local file to `bucket/key`. Failures are logged here and returned to the caller.
    pub async fn upload(&self, source: &Path, bucket: &str, key: &str) -> Result<UploadReceipt> {
        let result = self.try_upload(source, bucket, key).await;
        match &result {
            Ok(receipt) => tracing::info!(
                "File s3 Load: SUCCESS ({} bytes -> s3://{}/{})",
                receipt.bytes,
                receipt.bucket,
                receipt.key
            ),
            Err(e) => tracing::error!("File s3 Load: FAILED: {}", e),
        }
        result
    }

    async fn try_upload(&self, source: &Path, bucket: &str, key: &str) -> Result<UploadReceipt> {
        let metadata = tokio::fs::metadata(source)
            .await
            .map_err(|e| PipelineError::UploadError {
                message: format!("cannot read {}: {}", source.display(), e),
            })?;

        if !metadata.is_file() {
            return Err(PipelineError::UploadError {
                message: format!("{} is not a regular file", source.display()),
            });
        }

        tracing::debug!(
            "Uploading {} ({} bytes) to s3://{}/{}",
            source.display(),
            metadata.len(),
            bucket,
            key
        );
        self.store.put_file(source, bucket, key).await
    }
}
