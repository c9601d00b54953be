//! # WL-01 Digest Chain
//!
//! Deterministic validity engine and append-only block store.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (domain + pure algorithms)
//!
//! ## Purpose
//!
//! Model a simplified demo ledger whose entries are accepted or rejected by a
//! mutable analog policy window:
//! - A block's digest is a pure function of `(prev_digest, root_value,
//!   sequence, policy_center)` using IEEE-754 doubles and std trig, so two
//!   re-derivations are bit-identical.
//! - The chain is append-only; the only mutations are an explicit `tamper`
//!   demo hook, `reverify` (which touches validity flags only), and a full
//!   reset to genesis.
//!
//! ## Module Structure
//!
//! ```text
//! wl-01-digest-chain/
//! ├── digest/          # Pure functions: aggregate, compute_digest, verify
//! └── domain/          # Block, Chain, PolicyWindow, errors
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod digest;
pub mod domain;

// Re-exports
pub use digest::{aggregate, compute_digest, is_within_policy, verify, DEFAULT_TOLERANCE};
pub use domain::{
    Block, Chain, ChainError, LedgerInput, PolicyWindow, Proposal, DEFAULT_TAMPER_DELTA,
    GENESIS_DIGEST, GENESIS_PREV_DIGEST, GENESIS_ROOT_VALUE,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
