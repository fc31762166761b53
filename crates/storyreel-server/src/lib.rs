//! # storyreel-server
//!
//! Axum HTTP surface for the stock-media pipeline.
//!
//! - `POST /api/media/fetch-stock-media`: transcript segments → media items
//! - `GET /api/media/health`: liveness plus whether Pexels is configured
//! - `GET /metrics`: Prometheus exposition when a recorder is installed
//!
//! Errors render as `{ "success": false, "error": "..." }` via [`ApiError`].

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{ServerHandle, build_router, start};
pub use state::{AppState, build_pipeline};
