//! # storyreel-core
//!
//! Shared vocabulary for the stock-media pipeline.
//!
//! - **Segments**: [`segment::TranscriptSegment`] input and the derived [`segment::SearchQuery`]
//! - **Media**: [`media::MediaItem`] output records and in-memory [`media::DownloadedFile`] assets
//! - **Outcomes**: [`outcome::QueryOutcome`] per-segment status and the [`outcome::FetchReport`]
//! - **Errors**: [`errors::MediaError`] taxonomy via `thiserror`
//! - **Keywords**: [`keywords::generate_queries`] turns segments into search queries
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by every other storyreel crate.

#![deny(unsafe_code)]

pub mod errors;
pub mod keywords;
pub mod media;
pub mod outcome;
pub mod segment;

pub use errors::{MediaError, Result};
pub use media::{DownloadedFile, MediaItem, MediaKind};
pub use outcome::{FetchReport, OutcomeStatus, QueryOutcome};
pub use segment::{SearchQuery, TranscriptSegment};
