//! # Domain Errors
//!
//! Client error types. Decode failures never leave the client: they are
//! absorbed and counted so one bad frame cannot stop the stream. The
//! variants here are the ones callers actually see.

use thiserror::Error;

/// Ledger event client error types.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure on connect, send or fetch. Recoverable.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A frame failed to parse. Internal; surfaced only through the
    /// decode-failure counter, never per-message.
    #[error("Decode failure: {0}")]
    Decode(String),

    /// A snapshot was requested but there is neither a cache nor a
    /// reachable remote.
    #[error("No cached ledger state available")]
    NoCachedState,
}
