//! # WL-03 Ledger Event Client
//!
//! Resilient state-synchronization client for the remote witness service.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Maintain a best-effort live view of remote ledger state by combining a
//! push event stream with a pull-based fallback:
//! - Typed, closed event parsing; a malformed frame is dropped and counted,
//!   never surfaced to subscribers.
//! - The cached snapshot is replaced wholesale on every authoritative state
//!   event or successful poll, never merged field-by-field.
//! - On an unexpected drop, reconnects are scheduled with linearly growing
//!   delays, capped at a fixed attempt count; after the cap only an explicit
//!   `connect()` resumes.
//! - Listener fan-out is registration-ordered and panic-isolated.
//!
//! ## Module Structure
//!
//! ```text
//! wl-03-event-client/
//! ├── domain/          # Events, snapshot, connection state machine, errors
//! ├── ports/           # EventStream/StreamConnector + LedgerApi traits, mocks
//! ├── adapters/        # WebSocket (push) and HTTP (pull/control) transports
//! ├── application/     # LedgerEventClient
//! └── config.rs        # ClientConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{ClientEvent, HandlerId, LedgerEventClient};
pub use config::ClientConfig;
pub use domain::{
    ClientError, ConnectionState, ControlAction, EventKind, LedgerEvent, LedgerSnapshot,
    MAX_RECONNECT_ATTEMPTS,
};
pub use ports::{
    LedgerApi, MockLedgerApi, MockStreamConnector, EventStream, StreamConnector, StreamEnd,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
