//! # Digest Engine
//!
//! Pure, stateless digest computation and policy evaluation.
//!
//! Every function here is total: out-of-range inputs are clamped rather than
//! rejected, matching the analog tolerance model of the domain. Digest
//! equality is compared across re-derivations, so `compute_digest` must stay
//! on IEEE-754 doubles and the std `sin`/`cos` with no approximation.

use crate::domain::{Block, LedgerInput, PolicyWindow};
use std::f64::consts::TAU;

/// Default tolerance for block re-verification.
///
/// Strictly-less comparison against the absolute digest difference; absorbs
/// floating-point drift after a tamper that only shifts `root_value`.
pub const DEFAULT_TOLERANCE: f64 = 0.025;

// Mixing weights for (prev_digest, root_value, sequence/100, policy_center).
const W_PREV: f64 = 0.30;
const W_ROOT: f64 = 0.25;
const W_SEQ: f64 = 0.10;
const W_CENTER: f64 = 0.35;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Aggregate enabled input values into a root value in [0, 1].
///
/// Insertion order must not affect the result. Floating-point addition is
/// commutative but not associative, so the enabled values are summed in
/// total-order rather than insertion order.
pub fn aggregate(inputs: &[LedgerInput]) -> f64 {
    let mut values: Vec<f64> = inputs
        .iter()
        .filter(|i| i.enabled)
        .map(|i| clamp01(i.value))
        .collect();
    values.sort_by(f64::total_cmp);
    clamp01(values.iter().sum())
}

/// Compute the digest for a proposed block.
///
/// A weighted linear mix of the four inputs is pushed through a fixed
/// two-sinusoid shaping function and clamped to [0, 1]:
///
/// ```text
/// mix    = 0.30·prev + 0.25·root + 0.10·(sequence/100) + 0.35·center
/// digest = clamp(0.5 + 0.4·sin(mix·2π) + 0.1·cos(mix·4π), 0, 1)
/// ```
///
/// Deterministic bit-for-bit for identical inputs.
pub fn compute_digest(prev_digest: f64, root_value: f64, sequence: u64, policy_center: f64) -> f64 {
    let mix = W_PREV * clamp01(prev_digest)
        + W_ROOT * clamp01(root_value)
        + W_SEQ * clamp01(sequence as f64 / 100.0)
        + W_CENTER * clamp01(policy_center);

    clamp01(0.5 + 0.4 * (mix * TAU).sin() + 0.1 * (mix * 2.0 * TAU).cos())
}

/// Check whether a digest falls inside the policy window (closed interval).
pub fn is_within_policy(digest: f64, policy: &PolicyWindow) -> bool {
    let (lo, hi) = policy.interval();
    digest >= lo && digest <= hi
}

/// Re-verify a block against the current policy center.
///
/// Recomputes the expected digest from the block's stored `prev_digest`,
/// `root_value` and `sequence`, and accepts iff the absolute difference from
/// the stored digest is strictly below `tolerance`.
pub fn verify(block: &Block, policy_center: f64, tolerance: f64) -> bool {
    let expected = compute_digest(
        block.prev_digest,
        block.root_value,
        block.sequence,
        policy_center,
    );
    (expected - block.digest).abs() < tolerance
}
