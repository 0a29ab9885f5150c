// src/config.rs
// =============================================================================
// Runtime configuration for a validation run.
//
// Defaults match the reference behavior: 100 ms between resource probes and
// at most 10 source pages per run. The CLI overrides individual fields.
// =============================================================================

use std::time::Duration;

use crate::fetch::Relay;

pub const DEFAULT_PACING_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_SOURCES: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Forwarding relay used for page bodies and status checks
    pub relay: Relay,
    /// Fixed pause between two resource probes of the same page
    pub pacing: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Upper bound on source pages per run
    pub max_sources: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay: Relay::default(),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_sources: MAX_SOURCES,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn with_relay(mut self, relay: Relay) -> Self {
        self.relay = relay;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
