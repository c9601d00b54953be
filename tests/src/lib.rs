//! # Witness-Ledger Test Suite
//!
//! Unified test crate for cross-subsystem behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem choreography
//!     ├── digest_chain.rs    # End-to-end chain scenarios
//!     ├── lifecycle.rs       # Submission + verification job races
//!     └── event_client.rs    # Reconnect, fan-out, snapshot semantics
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wl-tests
//! ```

#![allow(dead_code)]

pub mod integration;

/// Install a fmt subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
