//! Prometheus metrics recorder and metric name constants.

use metrics::{Unit, describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Install the Prometheus metrics recorder (global).
///
/// Returns `None` if another recorder is already installed; metrics are then
/// recorded into that one and `/metrics` is not served.
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!(error = %e, "failed to install metrics recorder");
            None
        }
    }
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

/// Register help text for every metric below.
pub fn describe_metrics() {
    describe_counter!(STOCK_MEDIA_REQUESTS_TOTAL, "Fetch-stock-media requests accepted");
    describe_counter!(STOCK_MEDIA_QUERIES_TOTAL, "Queries processed, by outcome status");
    describe_counter!(STOCK_MEDIA_ITEMS_TOTAL, "Media items produced, by type");
    describe_histogram!(
        STOCK_MEDIA_REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Wall time of one pipeline run"
    );
    describe_counter!(PEXELS_REQUESTS_TOTAL, "Outbound Pexels requests, by endpoint");
    describe_counter!(PEXELS_ERRORS_TOTAL, "Failed Pexels requests, by endpoint and status");
}

// Metric name constants to avoid typos across crates.

/// Fetch requests total (counter).
pub const STOCK_MEDIA_REQUESTS_TOTAL: &str = "stock_media_requests_total";
/// Queries total (counter, labels: status).
pub const STOCK_MEDIA_QUERIES_TOTAL: &str = "stock_media_queries_total";
/// Items produced total (counter, labels: type).
pub const STOCK_MEDIA_ITEMS_TOTAL: &str = "stock_media_items_total";
/// Pipeline run duration seconds (histogram).
pub const STOCK_MEDIA_REQUEST_DURATION_SECONDS: &str = "stock_media_request_duration_seconds";
/// Pexels requests total (counter, labels: endpoint).
pub const PEXELS_REQUESTS_TOTAL: &str = "pexels_requests_total";
/// Pexels errors total (counter, labels: endpoint, status).
pub const PEXELS_ERRORS_TOTAL: &str = "pexels_errors_total";
