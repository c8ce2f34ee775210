//! Storage module for complaint images
//!
//! Defines the `BlobStore` seam and its S3-compatible implementation.

mod s3_store;
mod sigv4;

use async_trait::async_trait;

use crate::core::error::Result;

pub use s3_store::S3BlobStore;

/// Object storage holding uploaded images, addressed by key
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the container if needed; an existing container is not an error
    async fn ensure_container_exists(&self) -> Result<()>;

    /// Store `data` under `key` and return the URL clients can fetch it from
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}
