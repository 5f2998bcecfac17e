//! Image download client.
//!
//! The [`MediaFetcher`] trait is the seam the orchestrators depend on;
//! [`HttpFetcher`] is the production implementation. One attempt per URL,
//! no retry, no backoff. A transport error or a non-success status fails
//! the record and the caller decides what that means.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use pinflow_core::{AppError, AppResult};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Browser-like agent string; some image hosts refuse the default library
/// agent outright.
const FETCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fallback name for a URL whose path yields no usable filename.
const FALLBACK_DOWNLOAD_NAME: &str = "downloaded_image.jpg";

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download one URL and return its raw bytes.
    async fn fetch(&self, url: &str) -> AppResult<Bytes>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(FETCH_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| AppError::Parse(format!("Invalid URL: {}", url)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::Parse(format!(
                "Only http and https URLs are supported, got {}",
                url
            )));
        }

        tracing::info!(url = %url, "Downloading image");
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "{} returned status {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read body from {}: {}", url, e)))?;

        tracing::info!(
            url = %url,
            size_bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Download complete"
        );

        Ok(body)
    }
}

/// Derive a local filename for a bare download: the URL path's basename with
/// the query string already excluded, or a fixed fallback when the path has
/// no usable name.
pub fn derive_fetch_filename(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let basename = without_query.rsplit('/').next().unwrap_or("");
    if basename.is_empty() || !basename.contains('.') {
        FALLBACK_DOWNLOAD_NAME.to_string()
    } else {
        basename.to_string()
    }
}
