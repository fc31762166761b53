//! # storyreel-pexels
//!
//! Pexels video/photo search and asset downloads.
//!
//! - [`StockMediaSearch`]: search seam, implemented by [`PexelsClient`]
//! - [`AssetFetcher`]: download seam, implemented by [`HttpAssetFetcher`]
//!
//! Both traits exist so the pipeline can be driven by in-memory fakes.

#![deny(unsafe_code)]

pub mod client;
pub mod fetch;
pub mod models;

pub use client::{DEFAULT_BASE_URL, PexelsClient, PexelsConfig, StockMediaSearch, build_http_client};
pub use fetch::{AssetFetcher, HttpAssetFetcher};
pub use models::{Photo, PhotoSrc, Video, VideoFile, VideoUser};
