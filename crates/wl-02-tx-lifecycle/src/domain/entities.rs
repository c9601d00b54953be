//! # Domain Entities
//!
//! The `Transaction` lifecycle record and its monotonic status machine.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::time::SystemTime;

/// Transaction status.
///
/// Transitions are monotonic: `Pending -> Verifying -> terminal`. Terminal
/// states are immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Created, not yet forwarded for verification.
    Pending,
    /// Forwarded; a verification job may be running.
    Verifying,
    /// Verified successfully (timeout or remote confirmation).
    Completed,
    /// Verification failed.
    Failed,
    /// Explicitly cancelled while verifying.
    Cancelled,
}

impl TransactionStatus {
    /// Whether this status permits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether the status machine allows `self -> next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Verifying),
            Self::Verifying => next.is_terminal(),
            _ => false,
        }
    }
}

/// A transfer intent and its lifecycle record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque id assigned at creation.
    pub id: String,
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Amount in whole units.
    pub amount: u64,
    /// Current lifecycle status.
    pub status: TransactionStatus,
    /// Creation time.
    pub created_at: SystemTime,
    /// When verification started, if it has.
    pub verification_started_at: Option<SystemTime>,
    /// When a terminal state was reached, if it has been.
    pub completed_at: Option<SystemTime>,
}

impl Transaction {
    /// Create a new pending transaction.
    pub fn new(id: String, from: Address, to: Address, amount: u64) -> Self {
        Self {
            id,
            from,
            to,
            amount,
            status: TransactionStatus::Pending,
            created_at: SystemTime::now(),
            verification_started_at: None,
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_machine_forward_only() {
        use TransactionStatus::*;
        assert!(Pending.can_transition_to(Verifying));
        assert!(Verifying.can_transition_to(Completed));
        assert!(Verifying.can_transition_to(Failed));
        assert!(Verifying.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Verifying.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Cancelled.can_transition_to(Verifying));
    }

    #[test]
    fn test_terminal_states() {
        use TransactionStatus::*;
        assert!(!Pending.is_terminal());
        assert!(!Verifying.is_terminal());
        assert!(Completed.is_terminal());
        assert!(Failed.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = Transaction::new("tx-1".into(), "Alice".into(), "Bob".into(), 3);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.verification_started_at.is_none());
        assert!(tx.completed_at.is_none());
    }
}
