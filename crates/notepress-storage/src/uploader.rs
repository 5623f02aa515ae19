//! Upload seam for the publishing pipeline.

use std::time::Duration;

use async_trait::async_trait;
use notepress_core::PublishConfig;
use thiserror::Error;

use crate::direct::DirectUpload;
use crate::proxy::ProxyUpload;

/// Storage setup errors. Per-asset upload failures are not errors; they are
/// reported as `None` from [`Uploader::upload`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Upload abstraction consumed by the pipeline.
///
/// `None` means the asset could not be uploaded; the caller leaves the
/// original reference untouched in the document and continues.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        vault_path: &str,
        content_type: &str,
        data: &[u8],
    ) -> Option<String>;
}

/// Dual-strategy uploader: direct presigned PUT first, proxy upload second.
///
/// Uploads are not idempotent: object keys derive from the filename alone, so
/// a second upload of the same name overwrites the first.
pub struct StorageUploader {
    direct: Option<DirectUpload>,
    proxy: Option<ProxyUpload>,
}

impl StorageUploader {
    /// Build whichever strategies the configuration snapshot supports.
    pub fn from_config(config: &PublishConfig) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(StorageUploader {
            direct: DirectUpload::from_config(config, http.clone())?,
            proxy: ProxyUpload::from_config(config, http),
        })
    }

    /// Whether any upload strategy is configured.
    pub fn is_configured(&self) -> bool {
        self.direct.is_some() || self.proxy.is_some()
    }
}

#[async_trait]
impl Uploader for StorageUploader {
    async fn upload(
        &self,
        filename: &str,
        vault_path: &str,
        content_type: &str,
        data: &[u8],
    ) -> Option<String> {
        if data.is_empty() {
            tracing::error!(path = %vault_path, "Refusing to upload empty asset");
            return None;
        }

        if let Some(direct) = &self.direct {
            if let Some(url) = direct.upload(filename, content_type, data).await {
                return Some(url);
            }
            tracing::warn!(
                filename = %filename,
                "Direct upload failed, falling back to proxy upload"
            );
        }

        if let Some(proxy) = &self.proxy {
            return proxy.upload(filename, vault_path, content_type, data).await;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_snapshot_has_no_strategies() {
        let uploader = StorageUploader::from_config(&PublishConfig::default()).unwrap();
        assert!(!uploader.is_configured());
    }

    #[test]
    fn proxy_only_configuration() {
        let config = PublishConfig {
            upload_api_url: Some("https://upload.example.com".to_string()),
            cdn_domain: Some("https://cdn.example.com".to_string()),
            ..Default::default()
        };
        let uploader = StorageUploader::from_config(&config).unwrap();
        assert!(uploader.is_configured());
        assert!(uploader.direct.is_none());
        assert!(uploader.proxy.is_some());
    }

    #[tokio::test]
    async fn empty_asset_never_uploaded() {
        let config = PublishConfig {
            upload_api_url: Some("https://upload.example.com".to_string()),
            cdn_domain: Some("https://cdn.example.com".to_string()),
            ..Default::default()
        };
        let uploader = StorageUploader::from_config(&config).unwrap();

        // No network I/O happens for an empty payload, so this resolves
        // immediately even with an unreachable endpoint configured.
        let result = uploader.upload("cat.png", "cat.png", "image/png", &[]).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn unconfigured_upload_is_none() {
        let uploader = StorageUploader::from_config(&PublishConfig::default()).unwrap();
        let result = uploader
            .upload("cat.png", "cat.png", "image/png", b"data")
            .await;
        assert_eq!(result, None);
    }
}
