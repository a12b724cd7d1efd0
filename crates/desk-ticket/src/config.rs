//! Ticket engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the submit flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Order submission timeout (ms). Default: 10,000.
    ///
    /// A hung backend call becomes a classified timeout rejection
    /// instead of an open-ended loading state.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
    /// Price snapshot age (seconds) past which submission logs a
    /// staleness warning. Default: 30.
    #[serde(default = "default_stale_price_warn_secs")]
    pub stale_price_warn_secs: u64,
}

fn default_submit_timeout_ms() -> u64 {
    10_000
}

fn default_stale_price_warn_secs() -> u64 {
    30
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            submit_timeout_ms: default_submit_timeout_ms(),
            stale_price_warn_secs: default_stale_price_warn_secs(),
        }
    }
}

impl TicketConfig {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}
