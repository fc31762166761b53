//! Per-segment outcomes and the batch report returned to callers.

use serde::{Deserialize, Serialize};

use crate::errors::MediaError;
use crate::media::MediaItem;

/// What happened to one input segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// An item was produced.
    Fetched,
    /// Segment text had no usable keywords; nothing was searched.
    SkippedNoKeywords,
    /// Search returned no usable candidate.
    NoResults,
    /// Search endpoint failed.
    ProviderError,
    /// Asset or thumbnail could not be fetched.
    DownloadError,
    /// Any other per-query failure.
    Failed,
}

impl OutcomeStatus {
    /// Classify a per-query error.
    pub fn from_error(error: &MediaError) -> Self {
        match error {
            MediaError::Provider { .. } => Self::ProviderError,
            MediaError::Download { .. } | MediaError::MissingAsset(_) => Self::DownloadError,
            _ => Self::Failed,
        }
    }

    /// Label used in metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetched => "fetched",
            Self::SkippedNoKeywords => "skipped_no_keywords",
            Self::NoResults => "no_results",
            Self::ProviderError => "provider_error",
            Self::DownloadError => "download_error",
            Self::Failed => "failed",
        }
    }
}

/// Outcome record for one input segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// Input segment id.
    pub segment_id: i64,
    /// Absent when the segment produced no keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// What happened.
    pub status: OutcomeStatus,
    /// Error message for failed statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryOutcome {
    /// Segment produced no query.
    pub fn skipped(segment_id: i64) -> Self {
        Self {
            segment_id,
            query: None,
            status: OutcomeStatus::SkippedNoKeywords,
            error: None,
        }
    }

    /// Query ran without error and ended in `status`.
    pub fn completed(segment_id: i64, query: &str, status: OutcomeStatus) -> Self {
        Self {
            segment_id,
            query: Some(query.to_owned()),
            status,
            error: None,
        }
    }

    /// Query failed with `error`; the status is derived from it.
    pub fn errored(segment_id: i64, query: &str, error: &MediaError) -> Self {
        Self {
            segment_id,
            query: Some(query.to_owned()),
            status: OutcomeStatus::from_error(error),
            error: Some(error.to_string()),
        }
    }
}

/// Result of one fetch-stock-media run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    /// Items in query order.
    pub stock_media: Vec<MediaItem>,
    /// `stock_media.len()`.
    pub total_items: usize,
    /// Number of generated queries, not input segments.
    pub segments: usize,
    /// One entry per input segment, in input order.
    pub outcomes: Vec<QueryOutcome>,
}

impl FetchReport {
    /// Count outcomes with the given status.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
