//! # storyreel-telemetry
//!
//! `tracing` subscriber setup and Prometheus metric names.

#![deny(unsafe_code)]

pub mod metrics;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Configuration for the telemetry subsystem.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Default filter directive (e.g. `info`, `storyreel_pipeline=debug`).
    /// Overridden by the `RUST_LOG` env var.
    pub level: String,
    /// JSON lines on stdout instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

/// Build the env filter: `RUST_LOG` if set and valid, else the configured level.
pub fn build_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Subscriber for the window before settings are loaded.
///
/// Text output of `warn` and above on stderr. Install it with
/// [`tracing::subscriber::with_default`] around settings loading so that
/// ignored env overrides and clamped values are reported.
pub fn startup_subscriber() -> impl tracing::Subscriber + Send + Sync {
    startup_subscriber_with_writer(std::io::stderr)
}

/// [`startup_subscriber`] writing to `writer`.
pub fn startup_subscriber_with_writer<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(Level::WARN)
        .with_target(true)
        .with_ansi(false)
        .finish()
}

/// Initialize the global subscriber. Call once at startup.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> bool {
    let env_filter = build_filter(config);

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true)
    });
    let text_layer = (!config.json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_ok();

    if installed {
        metrics::describe_metrics();
    } else {
        eprintln!("storyreel-telemetry: subscriber already installed");
    }
    installed
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.json);
    }

    #[test]
    fn invalid_level_falls_back() {
        let config = TelemetryConfig {
            level: "[[[not a directive".to_string(),
            json: false,
        };
        // Must not panic whatever RUST_LOG holds.
        let _filter = build_filter(&config);
    }

    #[test]
    fn second_init_reports_false() {
        let config = TelemetryConfig {
            level: "warn".to_string(),
            json: false,
        };
        let _ = init_telemetry(&config);
        assert!(!init_telemetry(&config));
    }

    #[test]
    fn startup_subscriber_keeps_warnings_only() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = startup_subscriber_with_writer(move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("loading settings");
            tracing::warn!(key = "STORYREEL_PORT", "invalid u16 env var, ignoring");
        });

        let out = captured.text();
        assert!(out.contains("invalid u16 env var, ignoring"), "{out}");
        assert!(out.contains("STORYREEL_PORT"), "{out}");
        assert!(!out.contains("loading settings"), "{out}");
    }
}
