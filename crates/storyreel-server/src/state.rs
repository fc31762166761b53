//! Shared handler state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::PrometheusHandle;

use storyreel_pexels::{HttpAssetFetcher, PexelsClient, PexelsConfig};
use storyreel_pipeline::{RandomModality, StockMediaPipeline, limiter_for_millis};
use storyreel_settings::StoryreelSettings;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no Pexels API key is configured.
    pub pipeline: Option<Arc<StockMediaPipeline>>,
    /// Prometheus handle, when this process owns the recorder.
    pub metrics: Option<PrometheusHandle>,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// State around an already-built pipeline.
    pub fn new(pipeline: Option<Arc<StockMediaPipeline>>) -> Self {
        Self {
            pipeline,
            metrics: None,
            start_time: Instant::now(),
        }
    }

    /// Wire the production pipeline from settings.
    pub fn from_settings(settings: &StoryreelSettings) -> reqwest::Result<Self> {
        Ok(Self::new(build_pipeline(settings)?.map(Arc::new)))
    }

    /// Attach the Prometheus handle served on `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    /// Whether fetch requests can run.
    pub fn pexels_configured(&self) -> bool {
        self.pipeline.is_some()
    }
}

/// Build the pipeline, or `None` without an API key.
pub fn build_pipeline(settings: &StoryreelSettings) -> reqwest::Result<Option<StockMediaPipeline>> {
    let Some(api_key) = settings.pexels.api_key() else {
        return Ok(None);
    };

    let config = PexelsConfig {
        api_key: api_key.to_string(),
        base_url: settings.pexels.base_url.trim_end_matches('/').to_string(),
        per_page: settings.pexels.per_page,
        orientation: settings.pexels.orientation.clone(),
        timeout: Duration::from_secs(settings.pexels.timeout_secs),
    };
    let client = PexelsClient::new(config)?;
    let fetcher = HttpAssetFetcher::with_client(client.http_client());

    Ok(Some(
        StockMediaPipeline::builder(Arc::new(client), Arc::new(fetcher))
            .chooser(Arc::new(RandomModality))
            .limiter(limiter_for_millis(settings.pipeline.query_delay_ms))
            .max_keywords(settings.pipeline.max_keywords)
            .build(),
    ))
}
