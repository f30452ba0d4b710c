/// Object storage for uploaded blog images.
///
/// Wraps an S3-compatible client; custom endpoints (MinIO and similar) are
/// supported for development. Uploads return a stable retrievable URL built
/// from the configured public base URL.
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl Storage {
    /// Build the S3 client from configuration. Credentials come from the
    /// default AWS provider chain (env vars, profile, instance role).
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            // Path-style addressing is what MinIO-style endpoints expect.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Derive a collision-free object key from an uploaded file name.
    pub fn object_key(file_name: &str) -> String {
        let safe_name: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        format!("blog_images/{}-{}", Uuid::new_v4(), safe_name)
    }

    /// Retrievable URL for a stored object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Upload file content under the given key; returns the public URL.
    pub async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload {key}: {e}")))?;

        Ok(self.public_url(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_sanitizes_file_names() {
        let key = Storage::object_key("my photo (1).png");
        assert!(key.starts_with("blog_images/"));
        assert!(key.ends_with("my_photo__1_.png"));
        assert!(!key.contains(' '));
    }

    #[test]
    fn object_keys_are_unique_per_upload() {
        assert_ne!(Storage::object_key("a.png"), Storage::object_key("a.png"));
    }
}
