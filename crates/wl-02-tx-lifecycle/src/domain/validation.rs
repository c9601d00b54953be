//! # Transfer Validation
//!
//! Every rule is checked and every violation reported; validation never
//! fails fast, so callers (and tests) see the full set of problems at once.

use serde::{Deserialize, Serialize};
use shared_types::{is_well_formed_address, Address};
use thiserror::Error;

/// An unvalidated transfer request as received from the caller.
///
/// `amount` arrives as a double because the request crosses a JSON boundary;
/// integrality is a validation rule, not a type guarantee.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Requested amount.
    pub amount: f64,
}

/// A transfer request that passed every validation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedTransfer {
    /// Sender address.
    pub from: Address,
    /// Recipient address.
    pub to: Address,
    /// Amount, known integral and in range.
    pub amount: u64,
}

/// One violated validation rule.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Amount missing or not strictly positive.
    #[error("Amount must be positive, got {0}")]
    AmountNotPositive(f64),

    /// Amount is not a whole number.
    #[error("Amount must be integral, got {0}")]
    AmountNotIntegral(f64),

    /// Amount exceeds the configured maximum.
    #[error("Amount {amount} exceeds maximum {max}")]
    AmountTooLarge {
        /// Requested amount.
        amount: f64,
        /// Configured maximum.
        max: u64,
    },

    /// Recipient address is syntactically malformed.
    #[error("Malformed recipient address: {0:?}")]
    MalformedRecipient(String),

    /// Recipient and sender are the same account.
    #[error("Recipient must differ from sender")]
    SelfTransfer,
}

/// Validate a transfer request, accumulating all violations in rule order.
pub fn validate(
    request: &TransferRequest,
    max_amount: u64,
) -> Result<ValidatedTransfer, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !(request.amount > 0.0) {
        errors.push(ValidationError::AmountNotPositive(request.amount));
    }
    if request.amount.fract() != 0.0 || !request.amount.is_finite() {
        errors.push(ValidationError::AmountNotIntegral(request.amount));
    }
    if request.amount > max_amount as f64 {
        errors.push(ValidationError::AmountTooLarge {
            amount: request.amount,
            max: max_amount,
        });
    }
    if !is_well_formed_address(&request.to) {
        errors.push(ValidationError::MalformedRecipient(request.to.clone()));
    }
    if request.to == request.from {
        errors.push(ValidationError::SelfTransfer);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedTransfer {
        from: request.from.clone(),
        to: request.to.clone(),
        amount: request.amount as u64,
    })
}
