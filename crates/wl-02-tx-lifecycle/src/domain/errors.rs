//! # Domain Errors
//!
//! The lifecycle error taxonomy separates "my request was bad" (validation)
//! from "the system is misused" (duplicate jobs) and from infrastructure
//! failures (transport), so callers and tests can tell them apart.

use super::validation::ValidationError;
use thiserror::Error;

/// Transaction lifecycle error types.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The request violated one or more validation rules. Recoverable; no
    /// state was changed.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<ValidationError>),

    /// A verification job is already active for this transaction id. The
    /// existing job is left untouched.
    #[error("Verification already active for transaction {0}")]
    DuplicateVerification(String),

    /// Network failure while forwarding to the remote service. The
    /// submission is treated as failed; no transaction record remains.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The remote service refused the transfer.
    #[error("Transfer rejected by remote service")]
    SubmissionRejected,

    /// No transaction with this id is known.
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(String),

    /// The status machine forbids the requested transition. Like
    /// `DuplicateVerification`, this reports a misuse of the system rather
    /// than a bad user request.
    #[error("Transaction {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// Transaction id.
        id: String,
        /// Current status.
        from: crate::domain::TransactionStatus,
        /// Requested status.
        to: crate::domain::TransactionStatus,
    },
}
