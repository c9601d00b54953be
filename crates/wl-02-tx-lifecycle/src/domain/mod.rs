//! # Domain Layer
//!
//! Transaction entity, status machine, validation rules and errors.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::{Transaction, TransactionStatus};
pub use errors::LifecycleError;
pub use validation::{validate, TransferRequest, ValidatedTransfer, ValidationError};
