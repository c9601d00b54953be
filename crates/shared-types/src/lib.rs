//! # Shared Types Crate
//!
//! Cross-subsystem types for Witness-Ledger. Anything that crosses a crate
//! boundary (addresses, transfer intents, shared limits) is defined here so
//! there is a single source of truth.

pub mod entities;

pub use entities::*;
