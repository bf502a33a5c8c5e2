//! S3-compatible object storage provider.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream as S3ByteStream;
use bytes::Bytes;
use tracing::debug;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::traits::storage::{BlobStorage, ByteStream};

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Create a new S3 storage provider.
    ///
    /// Credentials come from the default AWS provider chain (environment,
    /// profile, instance metadata). A non-empty `endpoint` overrides the
    /// endpoint URL for S3-compatible services like MinIO.
    pub async fn new(endpoint: &str, region: &str, bucket: &str) -> AppResult<Self> {
        tracing::info!(endpoint, region, bucket, "Initializing S3 storage provider");

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));
        if !endpoint.is_empty() {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        Ok(Self {
            client: Client::new(&config),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl BlobStorage for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::new(
                    ErrorKind::Storage,
                    format!("S3 bucket '{}' unreachable: {e}", self.bucket),
                )
            })
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        let data = self.read_bytes(key).await?;
        Ok(Box::pin(futures::stream::once(async move { Ok(data) })))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    AppError::not_found(format!("Blob not found: {key}"))
                } else {
                    AppError::new(
                        ErrorKind::Storage,
                        format!("S3 get failed for '{key}': {service_err}"),
                    )
                }
            })?;

        let aggregated = output.body.collect().await.map_err(|e| {
            AppError::new(
                ErrorKind::Storage,
                format!("S3 body read failed for '{key}': {e}"),
            )
        })?;
        Ok(aggregated.into_bytes())
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(S3ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorKind::Storage,
                    format!("S3 put failed for '{key}': {}", e.into_service_error()),
                )
            })?;

        debug!(key, bytes = len, "Wrote blob to S3");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorKind::Storage,
                    format!("S3 delete failed for '{key}': {}", e.into_service_error()),
                )
            })?;

        debug!(key, "Deleted blob from S3");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(AppError::new(
                        ErrorKind::Storage,
                        format!("S3 head failed for '{key}': {service_err}"),
                    ))
                }
            }
        }
    }
}
