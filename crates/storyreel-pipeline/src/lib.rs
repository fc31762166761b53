//! # storyreel-pipeline
//!
//! Per-segment stock-media acquisition:
//!
//! 1. keyword query per segment (`storyreel_core::keywords`)
//! 2. modality choice + provider search ([`selector`])
//! 3. asset and thumbnail download (`storyreel_pexels::AssetFetcher`)
//! 4. item assembly and outcome accounting ([`pipeline`])
//!
//! Randomness and pacing are injected through [`ModalityChooser`] and
//! [`RateLimiter`].

#![deny(unsafe_code)]

pub mod assemble;
pub mod chooser;
pub mod limiter;
pub mod pipeline;
pub mod selector;

pub use chooser::{FixedModality, ModalityChooser, RandomModality, SeededModality};
pub use limiter::{FixedDelay, NoDelay, RateLimiter, limiter_for_millis};
pub use pipeline::{DEFAULT_QUERY_DELAY_MS, PipelineBuilder, StockMediaPipeline};
pub use selector::{MediaSelector, Selection};
