//! HTTP client wrapper for the Figma API.
//!
//! Create one [`FigmaClient`] per run and reuse it everywhere; the wrapped
//! reqwest client pools connections across the file fetch, the render-URL
//! batch calls, and every image download.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::types::{FileResponse, ImageResponse};
use crate::config::ImageFormat;

/// Production base URL of the Figma REST API.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Header carrying the personal access token.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// HTTP connect timeout (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// HTTP read timeout (2 minutes; renders are single images, not archives).
const READ_TIMEOUT_SECS: u64 = 120;

/// Client for the Figma REST API and its render CDN.
///
/// # Example
///
/// ```no_run
/// use figma_export::FigmaClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FigmaClient::new("my-token");
/// let file = client.get_file("aBc123").await?;
/// println!("root node: {}", file.document.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FigmaClient {
    client: Client,
    base_url: String,
    token: String,
}

impl FigmaClient {
    /// Creates a client against the production API base URL.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Tests point this at a local mock server.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a file: the document tree plus the component metadata table.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, non-2xx status, or an
    /// undecodable response body.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_file(&self, file_key: &str) -> Result<FileResponse, ApiError> {
        let url = format!("{}/v1/files/{file_key}", self.base_url);
        debug!(url = %url, "fetching file");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(&url, status.as_u16()));
        }

        response
            .json::<FileResponse>()
            .await
            .map_err(|e| ApiError::decode(&url, e))
    }

    /// Requests rendered image URLs for one batch of node ids.
    ///
    /// Returns the service's id-to-URL mapping. Ids the service dropped or
    /// could not render map to `None`; callers must treat those as
    /// non-fatal omissions.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, non-2xx status, an
    /// undecodable body, or a non-null `err` field in the response.
    #[instrument(level = "debug", skip(self, ids), fields(ids = ids.len()))]
    pub async fn get_image_urls(
        &self,
        file_key: &str,
        ids: &[String],
        format: ImageFormat,
        scale: f64,
    ) -> Result<HashMap<String, Option<String>>, ApiError> {
        let url = format!("{}/v1/images/{file_key}", self.base_url);
        debug!(url = %url, ids = ids.len(), %format, scale, "requesting render URLs");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .query(&[
                ("ids", ids.join(",").as_str()),
                ("format", format.extension()),
                ("scale", scale.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(&url, status.as_u16()));
        }

        let body = response
            .json::<ImageResponse>()
            .await
            .map_err(|e| ApiError::decode(&url, e))?;

        if let Some(message) = body.err {
            return Err(ApiError::Service { message });
        }

        Ok(body.images)
    }

    /// Downloads one rendered image from its short-lived URL.
    ///
    /// The render CDN URL is absolute and unauthenticated; the request
    /// carries a Content-Type header matching the output format. The whole
    /// body is buffered in memory (renders are single images).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure or non-2xx status.
    #[instrument(level = "debug", skip(self))]
    pub async fn download_image(&self, url: &str, format: ImageFormat) -> Result<Bytes, ApiError> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, format.content_type())
            .send()
            .await
            .map_err(|e| ApiError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http_status(url, status.as_u16()));
        }

        response.bytes().await.map_err(|e| ApiError::network(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = FigmaClient::with_base_url("token", "http://127.0.0.1:9999/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_new_uses_production_base() {
        let client = FigmaClient::new("token");
        assert_eq!(client.base_url(), DEFAULT_API_BASE);
    }
}
