//! # Lifecycle Configuration

use serde::{Deserialize, Serialize};
use shared_types::MAX_TRANSFER_AMOUNT;

/// Configuration for the transaction lifecycle manager.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Maximum accepted transfer amount.
    pub max_amount: u64,

    /// Verification job duration in milliseconds.
    pub verification_duration_ms: u64,

    /// Interval between progress publications in milliseconds.
    pub progress_tick_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_amount: MAX_TRANSFER_AMOUNT,
            verification_duration_ms: 3000,
            progress_tick_ms: 100,
        }
    }
}

impl LifecycleConfig {
    /// Create a config for testing (short timers).
    pub fn for_testing() -> Self {
        Self {
            max_amount: MAX_TRANSFER_AMOUNT,
            verification_duration_ms: 50,
            progress_tick_ms: 5,
        }
    }
}
