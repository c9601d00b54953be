//! # Client Configuration

use crate::domain::MAX_RECONNECT_ATTEMPTS;
use serde::{Deserialize, Serialize};

/// Configuration for the ledger event client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket endpoint for the push event stream.
    pub ws_url: String,

    /// HTTP base URL for the pull/control endpoints.
    pub http_url: String,

    /// Base reconnect delay in milliseconds; attempt `n` waits `n × base`.
    pub base_delay_ms: u64,

    /// Automatic reconnect attempts before requiring a manual `connect()`.
    pub max_reconnect_attempts: u32,

    /// Timeout for pull/control requests in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ws_url: "ws://127.0.0.1:8787/events".to_string(),
            http_url: "http://127.0.0.1:8787".to_string(),
            base_delay_ms: 1000,
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            request_timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Create a config for testing (millisecond timers).
    pub fn for_testing() -> Self {
        Self {
            base_delay_ms: 10,
            request_timeout_secs: 1,
            ..Self::default()
        }
    }
}
