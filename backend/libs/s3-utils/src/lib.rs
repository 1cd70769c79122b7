/// S3 client and upload operations for post images
use aws_sdk_s3::Client;
use std::sync::Arc;
use thiserror::Error;

pub mod config;
pub mod operations;

pub use config::S3Config;
pub use operations::S3Operations;

#[derive(Error, Debug)]
pub enum S3Error {
    #[error("S3 configuration error: {0}")]
    Config(String),

    #[error("S3 request failed: {0}")]
    Request(String),
}

/// Shared S3 client wrapper
#[derive(Clone)]
pub struct S3Client {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Client {
    /// Create new S3 client with configuration from environment
    pub async fn new() -> Result<Self, S3Error> {
        let config = S3Config::from_env()?;
        Self::with_config(config).await
    }

    /// Create new S3 client with custom configuration
    pub async fn with_config(config: S3Config) -> Result<Self, S3Error> {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(config.path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            path_style = config.path_style,
            "S3 client initialized"
        );

        Ok(Self {
            client: Arc::new(Client::from_conf(builder.build())),
            config,
        })
    }

    /// Upload/URL operations bound to this client
    pub fn operations(&self) -> S3Operations {
        S3Operations::new(self.client.clone(), self.config.clone())
    }

    /// Health check for S3 connectivity
    pub async fn health_check(&self) -> Result<(), S3Error> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| {
                S3Error::Request(aws_sdk_s3::error::DisplayErrorContext(e).to_string())
            })?;

        Ok(())
    }
}
