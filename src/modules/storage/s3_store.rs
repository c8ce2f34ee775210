//! S3-compatible blob store (MinIO, AWS S3, ...)
//!
//! Uses rust-s3 for object operations. The bucket gets an anonymous-read policy
//! so the `file_url` stored with a complaint can be opened directly by dashboards.

use async_trait::async_trait;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};

use super::sigv4::{self, SigningInput};
use super::BlobStore;
use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};

pub struct S3BlobStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    http_client: Client,
}

impl S3BlobStore {
    pub fn new(config: StorageConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.container, region.clone(), credentials.clone())
            .map_err(|e| AppError::Storage(format!("Failed to open bucket: {}", e)))?;

        // Path-style URLs (http://endpoint/bucket/key) work for MinIO and S3 alike
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        })
    }

    pub fn container_name(&self) -> String {
        self.bucket.name()
    }

    /// Public URL of an object under the configured public endpoint
    pub fn public_url(&self, key: &str) -> String {
        public_url(&self.public_endpoint, &self.bucket.name(), key)
    }

    async fn create_container(&self) -> Result<()> {
        let response = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create bucket: {}", e)))?;

        match response.response_code {
            200..=299 => {
                info!("Bucket '{}' created", self.bucket.name());
                Ok(())
            }
            _ if is_already_exists(&response.response_text) => {
                debug!("Bucket '{}' already exists", self.bucket.name());
                Ok(())
            }
            code => Err(AppError::Storage(format!(
                "Failed to create bucket '{}': HTTP {} {}",
                self.bucket.name(),
                code,
                response.response_text
            ))),
        }
    }

    /// Allow anonymous GET on every object in the bucket
    async fn allow_public_read(&self) -> Result<()> {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/*")]
                }
            ]
        })
        .to_string();

        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Storage(format!("Invalid storage endpoint: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Storage("Storage endpoint has no host".to_string()))?;
        let host = match endpoint_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let canonical_uri = format!("/{}", bucket_name);
        let signed = sigv4::sign(&SigningInput {
            method: "PUT",
            host: &host,
            canonical_uri: &canonical_uri,
            canonical_query: "policy=",
            payload: policy.as_bytes(),
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.region_name,
            now: chrono::Utc::now(),
        })?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Storage(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn ensure_container_exists(&self) -> Result<()> {
        self.create_container().await?;

        // A missing policy only affects how images are served, not intake
        if let Err(e) = self.allow_public_read().await {
            warn!(
                "Could not set public read policy on '{}': {}. Image links may require manual bucket configuration.",
                self.bucket.name(),
                e
            );
        }

        Ok(())
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        let response = self
            .bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload '{}': {}", key, e)))?;

        let code = response.status_code();
        if !(200..300).contains(&code) {
            return Err(AppError::Storage(format!(
                "Failed to upload '{}': HTTP {}",
                key, code
            )));
        }

        debug!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.bucket.name()
        );
        Ok(self.public_url(key))
    }
}

fn is_already_exists(response_text: &str) -> bool {
    response_text.contains("BucketAlreadyOwnedByYou")
        || response_text.contains("BucketAlreadyExists")
        || response_text.contains("already own it")
}

fn public_url(public_endpoint: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        public_endpoint.trim_end_matches('/'),
        bucket,
        urlencoding::encode(key)
    )
}
