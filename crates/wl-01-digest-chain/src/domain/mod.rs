//! # Domain Layer
//!
//! Block and chain entities, policy value objects, and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Block, Chain, DEFAULT_TAMPER_DELTA, GENESIS_DIGEST, GENESIS_PREV_DIGEST, GENESIS_ROOT_VALUE};
pub use errors::ChainError;
pub use value_objects::{LedgerInput, PolicyWindow, Proposal};
