//! Keyword extraction: transcript segment text → short stock-media search query.
//!
//! Normalization lower-cases the text and strips everything except ASCII word
//! characters (`[A-Za-z0-9_]`) and whitespace. Tokens of three characters or
//! fewer, and tokens in [`STOP_WORDS`], are dropped. The first
//! [`DEFAULT_MAX_KEYWORDS`] survivors form the query, in original order.

use crate::segment::{SearchQuery, TranscriptSegment};

/// Keywords kept per query unless configured otherwise.
pub const DEFAULT_MAX_KEYWORDS: usize = 3;

/// Tokens at or below this length never become keywords.
const MIN_TOKEN_LEN: usize = 3;

/// Filler words longer than [`MIN_TOKEN_LEN`] that make poor search terms.
pub const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "have", "they", "were", "been", "their", "said", "each", "which",
    "what", "there", "when", "where", "while", "will", "would", "could", "should", "might",
    "must",
];

fn is_kept_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()
}

/// Extract up to `max` keywords from `text`, preserving left-to-right order.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let normalized: String = text.to_lowercase().chars().filter(|c| is_kept_char(*c)).collect();

    normalized
        .split_whitespace()
        .filter(|token| token.len() > MIN_TOKEN_LEN && !STOP_WORDS.contains(token))
        .take(max)
        .map(str::to_owned)
        .collect()
}

/// Build the query for one segment, or `None` when no keyword survives.
pub fn build_query(segment: &TranscriptSegment, max_keywords: usize) -> Option<SearchQuery> {
    let keywords = extract_keywords(&segment.text, max_keywords);
    if keywords.is_empty() {
        return None;
    }

    Some(SearchQuery {
        segment_id: segment.id,
        start_time: segment.start,
        end_time: segment.end,
        query: keywords.join(" "),
        original_text: segment.text.clone(),
    })
}

/// Generate queries for a batch of segments, in input order.
///
/// Segments without usable keywords are skipped silently.
pub fn generate_queries(segments: &[TranscriptSegment], max_keywords: usize) -> Vec<SearchQuery> {
    segments
        .iter()
        .filter_map(|segment| build_query(segment, max_keywords))
        .collect()
}
