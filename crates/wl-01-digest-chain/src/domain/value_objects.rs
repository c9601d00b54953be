//! # Domain Value Objects
//!
//! Immutable value types for the digest chain.

use serde::{Deserialize, Serialize};

/// Minimum policy window width.
pub const MIN_POLICY_WIDTH: f64 = 0.05;

/// Maximum policy window width.
pub const MAX_POLICY_WIDTH: f64 = 0.5;

/// One candidate input for a pending block's root value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerInput {
    /// Contribution in [0, 1].
    pub value: f64,
    /// Only enabled inputs are aggregated.
    pub enabled: bool,
}

/// The mutable acceptance rule: a centered interval over digests.
///
/// The policy may change between block proposals, which is why historical
/// validity is re-derived on demand rather than cached permanently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyWindow {
    /// Interval center in [0, 1].
    pub center: f64,
    /// Interval width in [0.05, 0.5].
    pub width: f64,
}

impl PolicyWindow {
    /// Create a policy window, clamping both parameters to their bounds.
    pub fn new(center: f64, width: f64) -> Self {
        Self {
            center: center.clamp(0.0, 1.0),
            width: width.clamp(MIN_POLICY_WIDTH, MAX_POLICY_WIDTH),
        }
    }

    /// The accepted closed interval `[clamp(c−w/2), clamp(c+w/2)]`.
    pub fn interval(&self) -> (f64, f64) {
        (
            (self.center - self.width / 2.0).clamp(0.0, 1.0),
            (self.center + self.width / 2.0).clamp(0.0, 1.0),
        )
    }
}

impl Default for PolicyWindow {
    fn default() -> Self {
        Self::new(0.5, 0.3)
    }
}

/// Outcome of a non-mutating block proposal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Digest the block would carry.
    pub digest: f64,
    /// Whether that digest falls inside the policy window.
    pub is_valid: bool,
}
