//! # WL-02 Transaction Lifecycle
//!
//! Transfer submission, validation and asynchronous verification jobs.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Own the transaction state machine
//! `pending -> verifying -> {completed | failed | cancelled}` and coordinate
//! with the remote witness service:
//! - Validation accumulates every violated rule instead of failing fast.
//! - Each verifying transaction is backed by exactly one timer task; cancel
//!   and expiry race safely with a single winner.
//! - A failed forward to the remote service leaves no transaction record.
//!
//! ## Module Structure
//!
//! ```text
//! wl-02-tx-lifecycle/
//! ├── domain/          # Transaction, status machine, validation, errors
//! ├── ports/           # TransferGateway (outbound) + mock
//! ├── application/     # TransactionLifecycleManager
//! └── config.rs        # LifecycleConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{TransactionLifecycleManager, VerificationStatus};
pub use config::LifecycleConfig;
pub use domain::{
    LifecycleError, Transaction, TransactionStatus, TransferRequest, ValidatedTransfer,
    ValidationError,
};
pub use ports::{MockTransferGateway, TransferGateway};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
