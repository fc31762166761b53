//! Asset fetcher: remote URL → in-memory [`DownloadedFile`].

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use tracing::debug;

use storyreel_core::{DownloadedFile, MediaError, Result};
use storyreel_telemetry::metrics::{PEXELS_ERRORS_TOTAL, PEXELS_REQUESTS_TOTAL};

use crate::client::build_http_client;

/// Downloads one asset into memory.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch `url` and wrap the body as `file_name`.
    ///
    /// A non-success status is [`MediaError::Download`].
    async fn fetch(&self, url: &str, file_name: &str) -> Result<DownloadedFile>;
}

/// [`AssetFetcher`] over plain unauthenticated HTTP GETs.
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    /// Fetcher with its own client bounded by `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
        })
    }

    /// Reuse an existing client (and its connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str, file_name: &str) -> Result<DownloadedFile> {
        counter!(PEXELS_REQUESTS_TOTAL, "endpoint" => "download").increment(1);

        let response = self.client.get(url).send().await.map_err(|e| {
            counter!(PEXELS_ERRORS_TOTAL, "endpoint" => "download", "status" => "network")
                .increment(1);
            MediaError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            counter!(
                PEXELS_ERRORS_TOTAL,
                "endpoint" => "download",
                "status" => status.as_u16().to_string()
            )
            .increment(1);
            return Err(MediaError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MediaError::Network(e.to_string()))?;
        debug!(file_name, bytes = body.len(), "asset downloaded");
        Ok(DownloadedFile::new(file_name, body))
    }
}
