//! Pexels search client.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use storyreel_core::{MediaError, Result};
use storyreel_telemetry::metrics::{PEXELS_ERRORS_TOTAL, PEXELS_REQUESTS_TOTAL};

use crate::models::{Photo, PhotoSearchResponse, Video, VideoSearchResponse};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

const USER_AGENT: &str = concat!("storyreel/", env!("CARGO_PKG_VERSION"));

/// Search over a stock-media catalog.
///
/// Both methods return candidates in provider order; an empty list means no
/// results. A non-success status is [`MediaError::Provider`].
#[async_trait]
pub trait StockMediaSearch: Send + Sync {
    /// Search videos matching `query`.
    async fn search_videos(&self, query: &str) -> Result<Vec<Video>>;

    /// Search photos matching `query`.
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>>;
}

/// Connection settings for [`PexelsClient`].
#[derive(Clone, Debug)]
pub struct PexelsConfig {
    /// Sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// API root without a trailing slash.
    pub base_url: String,
    /// Candidates requested per search.
    pub per_page: u32,
    /// `landscape`, `portrait` or `square`.
    pub orientation: String,
    /// Bound on every request.
    pub timeout: Duration,
}

impl PexelsConfig {
    /// Production defaults around `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: 3,
            orientation: "landscape".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point at another API root, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// HTTP client for the Pexels video and photo search endpoints.
pub struct PexelsClient {
    client: reqwest::Client,
    config: PexelsConfig,
}

impl PexelsClient {
    /// Build a client for `config`.
    ///
    /// Fails only when the HTTP client itself cannot be constructed.
    pub fn new(config: PexelsConfig) -> reqwest::Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// The underlying HTTP client, for sharing with an asset fetcher.
    pub fn http_client(&self) -> reqwest::Client {
        self.client.clone()
    }

    async fn search<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        counter!(PEXELS_REQUESTS_TOTAL, "endpoint" => endpoint).increment(1);
        debug!(endpoint, query, "pexels search");

        let per_page = self.config.per_page.to_string();
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", self.config.orientation.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                counter!(PEXELS_ERRORS_TOTAL, "endpoint" => endpoint, "status" => "network")
                    .increment(1);
                MediaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            counter!(
                PEXELS_ERRORS_TOTAL,
                "endpoint" => endpoint,
                "status" => status.as_u16().to_string()
            )
            .increment(1);
            warn!(endpoint, status = status.as_u16(), "pexels search failed");
            return Err(MediaError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MediaError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StockMediaSearch for PexelsClient {
    async fn search_videos(&self, query: &str) -> Result<Vec<Video>> {
        let resp: VideoSearchResponse = self.search("videos", "/videos/search", query).await?;
        Ok(resp.videos)
    }

    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>> {
        let resp: PhotoSearchResponse = self.search("photos", "/v1/search", query).await?;
        Ok(resp.photos)
    }
}

/// Build the shared HTTP client with the storyreel user agent.
///
/// Every request through it is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    client_with_agent(timeout, USER_AGENT)
}

fn client_with_agent(timeout: Duration, user_agent: &str) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}
