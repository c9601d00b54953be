//! # Application Layer

pub mod client;

pub use client::{ClientEvent, HandlerId, LedgerEventClient};
