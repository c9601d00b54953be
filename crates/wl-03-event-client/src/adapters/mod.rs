//! # Adapters
//!
//! Real transports behind the outbound ports: WebSocket for the push stream,
//! HTTP for the pull/control plane.

pub mod http;
pub mod ws;

pub use http::HttpLedgerApi;
pub use ws::WsStreamConnector;
