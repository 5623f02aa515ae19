//! Configuration module
//!
//! Provides the immutable configuration snapshot consumed by the publishing
//! pipeline, the storage uploader, and the API client. A snapshot is taken once
//! per invocation; settings changes only apply to the next invocation.

use std::env;

/// Immutable configuration snapshot for one publish invocation.
#[derive(Clone, Debug, Default)]
pub struct PublishConfig {
    /// Base URL of the publish API.
    pub api_url: String,
    /// API key sent as `X-API-Key` on mutating calls.
    pub api_key: String,
    /// Author display name recorded in published note metadata.
    pub author: Option<String>,
    /// Base URL where published notes can be viewed (for building view links).
    pub published_url_base: Option<String>,
    /// Upload endpoint. Serves double duty: the S3-compatible endpoint for
    /// presigned PUTs and the POST target for proxy uploads.
    pub upload_api_url: Option<String>,
    /// Public CDN domain for uploaded assets.
    pub cdn_domain: Option<String>,
    /// Vault folder hint where attachments usually live (e.g. "attachments").
    pub attachment_folder: Option<String>,
    pub s3_access_key_id: Option<String>,
    pub s3_secret_access_key: Option<String>,
    pub s3_bucket: Option<String>,
    /// Region identifier; "auto" suits region-less S3-compatible providers.
    pub s3_region: String,
}

impl PublishConfig {
    /// Load a snapshot from environment variables.
    pub fn from_env() -> Self {
        PublishConfig {
            api_url: env::var("PUBLISH_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            api_key: env::var("PUBLISH_API_KEY").unwrap_or_default(),
            author: env::var("PUBLISH_AUTHOR").ok(),
            published_url_base: env::var("PUBLISHED_URL_BASE").ok(),
            upload_api_url: env::var("UPLOAD_API_URL").ok(),
            cdn_domain: env::var("CDN_DOMAIN").ok(),
            attachment_folder: env::var("ATTACHMENT_FOLDER").ok(),
            s3_access_key_id: env::var("S3_ACCESS_KEY_ID").ok(),
            s3_secret_access_key: env::var("S3_SECRET_ACCESS_KEY").ok(),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "auto".to_string()),
        }
    }

    /// Direct presigned-PUT uploads need full credentials plus an endpoint.
    pub fn direct_upload_configured(&self) -> bool {
        self.s3_access_key_id.is_some()
            && self.s3_secret_access_key.is_some()
            && self.s3_bucket.is_some()
            && self.upload_api_url.is_some()
    }

    /// Proxy uploads need the upload endpoint and a CDN domain.
    pub fn proxy_upload_configured(&self) -> bool {
        self.upload_api_url.is_some() && self.cdn_domain.is_some()
    }

    /// Whether any upload destination is configured. When this is false the
    /// pipeline skips image processing entirely.
    pub fn upload_configured(&self) -> bool {
        self.direct_upload_configured() || self.proxy_upload_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        let config = PublishConfig::default();
        assert!(!config.direct_upload_configured());
        assert!(!config.proxy_upload_configured());
        assert!(!config.upload_configured());
    }

    #[test]
    fn proxy_needs_endpoint_and_cdn() {
        let config = PublishConfig {
            upload_api_url: Some("https://upload.example.com".to_string()),
            ..Default::default()
        };
        assert!(!config.proxy_upload_configured());

        let config = PublishConfig {
            upload_api_url: Some("https://upload.example.com".to_string()),
            cdn_domain: Some("https://cdn.example.com".to_string()),
            ..Default::default()
        };
        assert!(config.proxy_upload_configured());
        assert!(config.upload_configured());
    }

    #[test]
    fn direct_needs_full_credentials() {
        let config = PublishConfig {
            upload_api_url: Some("https://s3.example.com".to_string()),
            s3_access_key_id: Some("key".to_string()),
            s3_secret_access_key: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!config.direct_upload_configured());

        let config = PublishConfig {
            s3_bucket: Some("bucket".to_string()),
            ..config
        };
        assert!(config.direct_upload_configured());
    }
}
