//! # Application Layer

pub mod manager;

pub use manager::{TransactionLifecycleManager, VerificationStatus};
