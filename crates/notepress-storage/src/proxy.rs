//! Proxy upload strategy.
//!
//! Sends the asset bytes, base64-encoded in a JSON envelope, to an upload API
//! that performs the object-storage write server-side and returns the stored
//! location.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use notepress_core::PublishConfig;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ProxyUploadRequest<'a> {
    filename: &'a str,
    content: String,
    #[serde(rename = "contentType")]
    content_type: &'a str,
    path: &'a str,
}

/// Upload API response. Servers differ on which field carries the stored
/// location, so all three spellings are accepted.
#[derive(Deserialize)]
struct ProxyUploadResponse {
    path: Option<String>,
    url: Option<String>,
    location: Option<String>,
}

impl ProxyUploadResponse {
    fn into_location(self) -> Option<String> {
        self.path.or(self.url).or(self.location)
    }
}

/// Uploads assets through the proxy endpoint and builds public CDN URLs.
#[derive(Clone, Debug)]
pub struct ProxyUpload {
    http: reqwest::Client,
    endpoint: String,
    cdn_domain: String,
}

impl ProxyUpload {
    /// Build the strategy from a configuration snapshot. Returns `None` when
    /// the endpoint or CDN domain is missing.
    pub fn from_config(config: &PublishConfig, http: reqwest::Client) -> Option<Self> {
        let endpoint = config.upload_api_url.clone()?;
        let cdn_domain = config.cdn_domain.clone()?;
        Some(ProxyUpload {
            http,
            endpoint,
            cdn_domain,
        })
    }

    /// Deterministic placeholder URL used when the proxy cannot store the
    /// asset (501 response or transport failure). Publishing proceeds with
    /// this URL instead of aborting.
    fn fallback_url(&self, filename: &str) -> String {
        format!(
            "{}/fallback/{}",
            self.cdn_domain.trim_end_matches('/'),
            urlencoding::encode(filename)
        )
    }

    /// Public URL for a location returned by the proxy: absolute URLs pass
    /// through unchanged, relative ones are joined to the CDN domain with
    /// exactly one slash between them.
    fn public_url(&self, location: &str) -> String {
        if location.starts_with("http") {
            return location.to_string();
        }
        format!(
            "{}/{}",
            self.cdn_domain.trim_end_matches('/'),
            location.trim_start_matches('/')
        )
    }

    pub async fn upload(
        &self,
        filename: &str,
        vault_path: &str,
        content_type: &str,
        data: &[u8],
    ) -> Option<String> {
        let body = ProxyUploadRequest {
            filename,
            content: BASE64.encode(data),
            content_type,
            path: vault_path,
        };

        let response = match self.http.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                // A transport-level failure degrades to the placeholder URL so
                // the document publish can still complete.
                tracing::warn!(
                    error = %e,
                    filename = %filename,
                    "Network error during proxy upload, using fallback URL"
                );
                return Some(self.fallback_url(filename));
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            if status == reqwest::StatusCode::NOT_IMPLEMENTED {
                tracing::warn!(
                    filename = %filename,
                    "Proxy endpoint returned 501 Not Implemented, using fallback URL"
                );
                return Some(self.fallback_url(filename));
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = %status,
                body = %error_text,
                filename = %filename,
                "Proxy upload failed"
            );
            return None;
        }

        let parsed: ProxyUploadResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Failed to parse proxy upload response");
                return None;
            }
        };

        match parsed.into_location() {
            Some(location) => Some(self.public_url(&location)),
            None => {
                tracing::error!(
                    filename = %filename,
                    "Proxy upload response carried no path, url, or location field"
                );
                None
            }
        }
    }
}
