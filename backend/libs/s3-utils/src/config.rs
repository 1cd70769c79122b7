/// S3 configuration for image storage
use serde::{Deserialize, Serialize};

use crate::S3Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Custom endpoint (MinIO, localstack); `None` uses AWS
    pub endpoint: Option<String>,
    /// Base URL for public access (CDN domain or custom endpoint)
    pub base_url: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
    /// Upload objects with the `public-read` canned ACL
    pub public_read: bool,
}

impl S3Config {
    /// Load S3 configuration from environment variables.
    ///
    /// `S3_BUCKET_NAME` is required; everything else has a default.
    pub fn from_env() -> Result<Self, S3Error> {
        let bucket = std::env::var("S3_BUCKET_NAME")
            .or_else(|_| std::env::var("S3_BUCKET"))
            .map_err(|_| S3Error::Config("S3_BUCKET_NAME must be set".to_string()))?;

        if bucket.trim().is_empty() {
            return Err(S3Error::Config("S3_BUCKET_NAME must not be empty".to_string()));
        }

        Ok(Self {
            bucket,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint: std::env::var("S3_ENDPOINT").ok().filter(|v| !v.trim().is_empty()),
            base_url: std::env::var("S3_BASE_URL").ok().filter(|v| !v.trim().is_empty()),
            path_style: std::env::var("S3_PATH_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            public_read: std::env::var("S3_PUBLIC_READ")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        })
    }

    /// Build the public URL of an object
    pub fn object_url(&self, key: &str) -> String {
        match (&self.base_url, self.path_style) {
            (Some(base), true) => {
                format!("{}/{}/{}", base.trim_end_matches('/'), self.bucket, key)
            }
            (Some(base), false) => format!("{}/{}", base.trim_end_matches('/'), key),
            (None, true) => format!(
                "https://s3.{}.amazonaws.com/{}/{}",
                self.region, self.bucket, key
            ),
            (None, false) => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}
