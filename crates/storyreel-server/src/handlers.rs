//! `/api/media/*` and `/metrics` handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use metrics::counter;
use serde::Serialize;
use serde_json::Value;
use tracing::{field, info, instrument};

use storyreel_core::{FetchReport, MediaError, TranscriptSegment};
use storyreel_telemetry::metrics::STOCK_MEDIA_REQUESTS_TOTAL;

use crate::error::ApiError;
use crate::state::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Payload.
    pub data: T,
}

/// Health response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// Whether an API key is loaded.
    pub pexels_configured: bool,
    /// Seconds since startup.
    pub uptime_secs: u64,
}

/// Validated fetch request.
#[derive(Debug)]
pub struct FetchRequest {
    /// Non-empty, in caller order.
    pub segments: Vec<TranscriptSegment>,
    /// Caller's story id, used only for logging.
    pub story_id: Option<String>,
}

/// Validate a raw request body.
///
/// `segments` must be present, an array, non-empty, and every element must
/// be a well-formed segment.
pub fn parse_fetch_request(body: &[u8]) -> Result<FetchRequest, MediaError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| MediaError::InvalidRequest(format!("request body is not valid JSON: {e}")))?;

    let raw_segments = match value.get("segments") {
        Some(Value::Array(items)) if !items.is_empty() => items.clone(),
        _ => {
            return Err(MediaError::InvalidRequest(
                "segments must be a non-empty array".into(),
            ));
        }
    };

    let segments = raw_segments
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value::<TranscriptSegment>(raw)
                .map_err(|e| MediaError::InvalidRequest(format!("invalid segment at index {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let story_id = value
        .get("storyId")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(FetchRequest { segments, story_id })
}

/// POST /api/media/fetch-stock-media
#[instrument(skip_all, fields(segments = field::Empty, story_id = field::Empty))]
pub async fn fetch_stock_media(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<FetchReport>>, ApiError> {
    let request = parse_fetch_request(&body)?;
    let span = tracing::Span::current();
    let _ = span.record("segments", request.segments.len());
    if let Some(story_id) = &request.story_id {
        let _ = span.record("story_id", story_id.as_str());
    }

    let pipeline = state.pipeline.as_ref().ok_or(MediaError::MissingApiKey)?;

    counter!(STOCK_MEDIA_REQUESTS_TOTAL).increment(1);
    info!(segments = request.segments.len(), "fetching stock media");

    let report = pipeline.run(&request.segments).await?;
    Ok(Json(ApiResponse {
        success: true,
        data: report,
    }))
}

/// GET /api/media/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Media API is healthy".into(),
        pexels_configured: state.pexels_configured(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /metrics
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
            storyreel_telemetry::metrics::render(handle),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}
