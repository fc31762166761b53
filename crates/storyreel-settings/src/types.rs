//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! JSON file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{Result, SettingsError};

/// Largest page size the Pexels search endpoints accept.
pub const MAX_PER_PAGE: u32 = 80;

/// Root settings type.
///
/// ```json
/// {
///   "server": { "port": 3100 },
///   "pexels": { "apiKey": "..." }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryreelSettings {
    /// HTTP listener.
    pub server: ServerSettings,
    /// Pexels API access.
    pub pexels: PexelsSettings,
    /// Per-request pipeline behavior.
    pub pipeline: PipelineSettings,
    /// Log output.
    pub logging: LoggingSettings,
}

impl StoryreelSettings {
    /// Clamp out-of-range values and reject unusable ones.
    pub fn validate(&mut self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(SettingsError::InvalidValue("server.host is empty".into()));
        }
        if self.pexels.base_url.trim().is_empty() {
            return Err(SettingsError::InvalidValue("pexels.baseUrl is empty".into()));
        }

        let clamped = self.pexels.per_page.clamp(1, MAX_PER_PAGE);
        if clamped != self.pexels.per_page {
            warn!(
                from = self.pexels.per_page,
                to = clamped,
                "pexels.perPage out of range, clamping"
            );
            self.pexels.per_page = clamped;
        }
        if self.pexels.timeout_secs == 0 {
            warn!("pexels.timeoutSecs is 0, using default");
            self.pexels.timeout_secs = PexelsSettings::default().timeout_secs;
        }
        if self.pipeline.max_keywords == 0 {
            warn!("pipeline.maxKeywords is 0, using default");
            self.pipeline.max_keywords = PipelineSettings::default().max_keywords;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port. `0` picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3100,
        }
    }
}

/// Pexels API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PexelsSettings {
    /// API key sent as the `Authorization` header. Absent means unconfigured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Candidates requested per search.
    pub per_page: u32,
    /// Orientation filter passed to both search endpoints.
    pub orientation: String,
    /// Per-request timeout for searches and downloads.
    pub timeout_secs: u64,
}

impl PexelsSettings {
    /// The API key, if set to a non-blank value.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Default for PexelsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.pexels.com".to_string(),
            per_page: 3,
            orientation: "landscape".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Pipeline settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineSettings {
    /// Pause after every query, in milliseconds. `0` disables pacing.
    pub query_delay_ms: u64,
    /// Keywords kept per query.
    pub max_keywords: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            query_delay_ms: 150,
            max_keywords: 3,
        }
    }
}

/// Log output settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = StoryreelSettings::default();
        assert_eq!(s.server.port, 3100);
        assert_eq!(s.pexels.base_url, "https://api.pexels.com");
        assert_eq!(s.pexels.per_page, 3);
        assert_eq!(s.pexels.orientation, "landscape");
        assert_eq!(s.pexels.timeout_secs, 30);
        assert!(s.pexels.api_key.is_none());
        assert_eq!(s.pipeline.query_delay_ms, 150);
        assert_eq!(s.pipeline.max_keywords, 3);
        assert_eq!(s.logging.level, "info");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(StoryreelSettings::default()).unwrap();
        assert_eq!(json["pexels"]["perPage"], 3);
        assert_eq!(json["pipeline"]["queryDelayMs"], 150);
        assert!(json["pexels"].get("apiKey").is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: StoryreelSettings =
            serde_json::from_str(r#"{"pexels": {"apiKey": "k"}}"#).unwrap();
        assert_eq!(s.pexels.api_key(), Some("k"));
        assert_eq!(s.pexels.per_page, 3);
        assert_eq!(s.server.port, 3100);
    }

    #[test]
    fn blank_api_key_is_unconfigured() {
        let mut s = PexelsSettings::default();
        s.api_key = Some("   ".into());
        assert!(s.api_key().is_none());
    }

    #[test]
    fn validate_clamps_per_page() {
        let mut s = StoryreelSettings::default();
        s.pexels.per_page = 500;
        s.validate().unwrap();
        assert_eq!(s.pexels.per_page, MAX_PER_PAGE);

        s.pexels.per_page = 0;
        s.validate().unwrap();
        assert_eq!(s.pexels.per_page, 1);
    }

    #[test]
    fn validate_restores_zero_values() {
        let mut s = StoryreelSettings::default();
        s.pexels.timeout_secs = 0;
        s.pipeline.max_keywords = 0;
        s.validate().unwrap();
        assert_eq!(s.pexels.timeout_secs, 30);
        assert_eq!(s.pipeline.max_keywords, 3);
    }

    #[test]
    fn validate_rejects_empty_host() {
        let mut s = StoryreelSettings::default();
        s.server.host = String::new();
        assert!(matches!(s.validate(), Err(SettingsError::InvalidValue(_))));
    }
}
