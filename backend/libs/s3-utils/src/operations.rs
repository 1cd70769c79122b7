/// S3 object upload
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use std::sync::Arc;

use crate::config::S3Config;
use crate::S3Error;

#[derive(Clone)]
pub struct S3Operations {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Operations {
    pub fn new(client: Arc<Client>, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Upload an object and return its public URL
    pub async fn upload_file(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, S3Error> {
        let size = body.len();
        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body));

        if self.config.public_read {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request
            .send()
            .await
            .map_err(|e| S3Error::Request(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(key, size, "Object uploaded to S3");

        Ok(self.config.object_url(key))
    }
}
