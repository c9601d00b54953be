//! # Domain Layer
//!
//! Typed events, the reconciled snapshot, the connection state machine and
//! errors.

pub mod connection;
pub mod errors;
pub mod events;
pub mod snapshot;

pub use connection::{ConnectionState, MAX_RECONNECT_ATTEMPTS};
pub use errors::ClientError;
pub use events::{ControlAction, EventKind, LedgerEvent};
pub use snapshot::LedgerSnapshot;
