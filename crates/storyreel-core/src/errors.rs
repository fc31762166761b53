/// Typed error hierarchy for stock-media acquisition.
///
/// Request-fatal: [`MediaError::MissingApiKey`], [`MediaError::InvalidRequest`].
/// Scoped to one query: everything else.
#[derive(Clone, Debug, thiserror::Error)]
pub enum MediaError {
    // Request-fatal
    /// No Pexels API key in settings or environment.
    #[error("Pexels API key is not configured")]
    MissingApiKey,
    /// Malformed request body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // Per-query
    /// Search endpoint answered with a non-success status.
    #[error("provider error {status}: {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// Asset URL answered with a non-success status.
    #[error("download failed for {url}: HTTP {status}")]
    Download {
        /// Asset URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Transport failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),
    /// Search response body did not match the expected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    /// Chosen candidate lacks a URL the item needs.
    #[error("candidate is missing {0}")]
    MissingAsset(&'static str),
}

impl MediaError {
    /// Whether this error aborts the whole request rather than one query.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidRequest(_))
    }

    /// Whether the error came from fetching asset bytes rather than searching.
    pub fn is_download(&self) -> bool {
        matches!(self, Self::Download { .. } | Self::MissingAsset(_))
    }

    /// Short classification string for logging/metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Provider { .. } => "provider_error",
            Self::Download { .. } => "download_error",
            Self::Network(_) => "network_error",
            Self::Decode(_) => "decode_error",
            Self::MissingAsset(_) => "missing_asset",
        }
    }
}

/// Result alias used across storyreel crates.
pub type Result<T> = std::result::Result<T, MediaError>;
