//! Provider selection from configuration.

use std::sync::Arc;

use portal_core::config::storage::StorageConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_core::traits::storage::BlobStorage;

use crate::providers::{LocalStorageProvider, S3StorageProvider};

/// Initialize the configured blob storage backend.
pub async fn init_storage(config: &StorageConfig) -> AppResult<Arc<dyn BlobStorage>> {
    match config.provider.as_str() {
        "local" => {
            let provider = LocalStorageProvider::new(&config.local.root_path).await?;
            Ok(Arc::new(provider))
        }
        "s3" => {
            if config.s3.bucket.is_empty() {
                return Err(AppError::configuration(
                    "storage.s3.bucket must be set when the s3 provider is selected",
                ));
            }
            let provider =
                S3StorageProvider::new(&config.s3.endpoint, &config.s3.region, &config.s3.bucket)
                    .await?;
            Ok(Arc::new(provider))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'. Expected 'local' or 's3'"
        ))),
    }
}
