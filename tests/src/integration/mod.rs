//! Cross-subsystem integration tests.

pub mod digest_chain;
pub mod event_client;
pub mod lifecycle;
