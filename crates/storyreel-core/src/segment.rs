//! Transcript segments and the search queries derived from them.

use serde::{Deserialize, Serialize};

/// A time-bounded slice of a story transcript, supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caller-assigned segment identifier.
    pub id: i64,
    /// Segment start, in seconds.
    pub start: f64,
    /// Segment end, in seconds.
    pub end: f64,
    /// Spoken text for this slice.
    #[serde(default)]
    pub text: String,
}

/// Keyword query derived from one segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Id of the segment this query came from.
    pub segment_id: i64,
    /// Copied from the segment's `start`.
    pub start_time: f64,
    /// Copied from the segment's `end`.
    pub end_time: f64,
    /// Space-joined keywords sent to the search provider.
    pub query: String,
    /// The segment text before normalization.
    pub original_text: String,
}
