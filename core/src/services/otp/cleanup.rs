//! Periodic removal of expired OTP records
//!
//! Expiry is also enforced lazily on every verification, so the sweep only
//! bounds how long dead records occupy memory.

use std::sync::Arc;
use tracing::{debug, info, warn};

use ev_shared::OtpConfig;

use super::registry::OtpRegistry;
use super::traits::{Clock, IdGenerator};

/// Configuration for the OTP cleanup service
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for OtpCleanupConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweep_interval_seconds > 0,
        }
    }
}

/// Service sweeping expired records out of the registry
pub struct OtpCleanupService<C: Clock + 'static, G: IdGenerator + 'static> {
    registry: Arc<OtpRegistry<C, G>>,
    config: OtpCleanupConfig,
}

impl<C: Clock, G: IdGenerator> OtpCleanupService<C, G> {
    /// Create a new cleanup service
    pub fn new(registry: Arc<OtpRegistry<C, G>>, config: OtpCleanupConfig) -> Self {
        Self { registry, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let expired_removed = self.registry.sweep_expired().await;
        debug!(expired_removed, "OTP cleanup cycle finished");

        CleanupResult { expired_removed }
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals. The first
    /// sweep happens one full interval after start.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "OTP cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.tick().await; // first tick completes immediately

            loop {
                interval_timer.tick().await;
                self.run_cleanup().await;
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records removed
    pub expired_removed: usize,
}
