//! # Domain Errors
//!
//! Error types for the digest chain.

use thiserror::Error;

/// Digest chain error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    /// No block with the requested id exists in the chain.
    #[error("Block not found: {0}")]
    BlockNotFound(u64),
}
