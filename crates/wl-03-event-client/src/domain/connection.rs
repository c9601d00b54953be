//! # Connection State Machine
//!
//! `Disconnected -> Connecting -> Connected`, with linear-backoff reconnect
//! scheduling on unexpected drops.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Automatic reconnect attempts before the client gives up and waits for a
/// manual `connect()`.
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Connection state of the push channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No connection; nothing in flight.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The event stream is live.
    Connected,
}

/// Delay before reconnect attempt `attempt` (1-based): `attempt × base`.
///
/// Strictly increasing across consecutive failures; the attempt counter
/// resets to zero on every successful connect.
pub fn reconnect_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt)
}
