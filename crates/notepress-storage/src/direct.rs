//! Direct presigned-PUT upload strategy.

use std::time::Duration;

use http::Method;
use notepress_core::text::sanitize_filename;
use notepress_core::PublishConfig;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;

use crate::uploader::StorageError;

/// Validity window for presigned PUT URLs. Must exceed the expected
/// end-to-end upload duration.
const PRESIGN_EXPIRY: Duration = Duration::from_secs(3600);

/// Uploads assets by presigning a PUT URL against an S3-compatible endpoint
/// and performing the PUT directly.
#[derive(Debug)]
pub struct DirectUpload {
    store: AmazonS3,
    http: reqwest::Client,
    /// Base for public URLs: the CDN domain when configured, the storage
    /// endpoint otherwise.
    public_base: String,
}

impl DirectUpload {
    /// Build the strategy from a configuration snapshot. Returns `Ok(None)`
    /// when the snapshot lacks credentials, bucket, or endpoint.
    pub fn from_config(
        config: &PublishConfig,
        http: reqwest::Client,
    ) -> Result<Option<Self>, StorageError> {
        let (Some(access_key_id), Some(secret_access_key), Some(bucket), Some(endpoint)) = (
            config.s3_access_key_id.as_deref(),
            config.s3_secret_access_key.as_deref(),
            config.s3_bucket.as_deref(),
            config.upload_api_url.as_deref(),
        ) else {
            return Ok(None);
        };

        let allow_http = endpoint.starts_with("http://");
        let store = AmazonS3Builder::new()
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .with_bucket_name(bucket)
            .with_region(config.s3_region.clone())
            .with_endpoint(endpoint)
            .with_allow_http(allow_http)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let public_base = config
            .cdn_domain
            .as_deref()
            .unwrap_or(endpoint)
            .trim_end_matches('/')
            .to_string();

        Ok(Some(DirectUpload {
            store,
            http,
            public_base,
        }))
    }

    /// Object key for a filename: sanitized and placed under `uploads/`.
    /// Keys derive from the filename only, so a re-upload of the same name
    /// silently overwrites the prior object.
    pub fn object_key(filename: &str) -> String {
        format!("uploads/{}", sanitize_filename(filename))
    }

    /// Presign a PUT and perform it. Any failure (signing, transport, non-200
    /// status) is reported as `None` so the caller can fall through to the
    /// proxy strategy.
    pub async fn upload(&self, filename: &str, content_type: &str, data: &[u8]) -> Option<String> {
        let key = Self::object_key(filename);
        let location = Path::from(key.clone());

        let presigned = match self
            .store
            .signed_url(Method::PUT, &location, PRESIGN_EXPIRY)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Failed to presign PUT URL");
                return None;
            }
        };

        let start = std::time::Instant::now();
        let response = self
            .http
            .put(presigned.as_str())
            .header("Content-Type", content_type)
            .body(data.to_vec())
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => {
                tracing::info!(
                    key = %key,
                    size_bytes = data.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Direct upload successful"
                );
                Some(format!("{}/{}", self.public_base, key))
            }
            Ok(resp) => {
                tracing::warn!(
                    status = %resp.status(),
                    key = %key,
                    "Presigned PUT rejected"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Presigned PUT failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_is_sanitized_under_uploads() {
        assert_eq!(
            DirectUpload::object_key("My Photo (1).PNG"),
            "uploads/my-photo-1.png"
        );
        assert_eq!(DirectUpload::object_key("cat.png"), "uploads/cat.png");
    }

    #[test]
    fn unconfigured_snapshot_builds_nothing() {
        let config = PublishConfig::default();
        let strategy = DirectUpload::from_config(&config, reqwest::Client::new()).unwrap();
        assert!(strategy.is_none());
    }

    #[test]
    fn cdn_domain_preferred_over_endpoint_for_public_urls() {
        let config = PublishConfig {
            upload_api_url: Some("https://s3.example.com".to_string()),
            cdn_domain: Some("https://cdn.example.com/".to_string()),
            s3_access_key_id: Some("key".to_string()),
            s3_secret_access_key: Some("secret".to_string()),
            s3_bucket: Some("bucket".to_string()),
            s3_region: "auto".to_string(),
            ..Default::default()
        };
        let strategy = DirectUpload::from_config(&config, reqwest::Client::new())
            .unwrap()
            .unwrap();
        assert_eq!(strategy.public_base, "https://cdn.example.com");
    }
}
