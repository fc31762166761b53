//! Pacing between successive provider queries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Pause applied after every query, successful or not.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait before the next query may start.
    async fn pause(&self);
}

/// Sleep a fixed duration.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// Delay of `ms` milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// No pacing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn pause(&self) {}
}

/// Limiter for a configured delay; `0` disables pacing.
pub fn limiter_for_millis(ms: u64) -> Arc<dyn RateLimiter> {
    if ms == 0 {
        Arc::new(NoDelay)
    } else {
        Arc::new(FixedDelay::from_millis(ms))
    }
}
