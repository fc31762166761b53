//! Server configuration.

use serde::{Deserialize, Serialize};

use storyreel_settings::StoryreelSettings;

/// Configuration for the HTTP listener.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Listener from loaded settings, other fields at their defaults.
    pub fn from_settings(settings: &StoryreelSettings) -> Self {
        Self {
            host: settings.server.host.clone(),
            port: settings.server.port,
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_bytes: 4 * 1024 * 1024, // 4 MB
        }
    }
}
