//! # Ports
//!
//! Outbound trait for forwarding transfers to the remote witness service,
//! plus a mock for transport-free tests.

use crate::domain::LifecycleError;
use async_trait::async_trait;
use shared_types::Address;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outbound port: forwards accepted transfers to the remote ledger service.
#[async_trait]
pub trait TransferGateway: Send + Sync {
    /// Forward a transfer. `Ok(true)` means the remote service accepted it;
    /// `Ok(false)` means it refused; `Err` is a transport failure.
    async fn send_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<bool, LifecycleError>;
}

/// Mock gateway for testing.
pub struct MockTransferGateway {
    /// Response for every call.
    pub accept: bool,
    /// Simulate a transport failure?
    pub fail_transport: bool,
    sent: AtomicUsize,
}

impl Default for MockTransferGateway {
    fn default() -> Self {
        Self {
            accept: true,
            fail_transport: false,
            sent: AtomicUsize::new(0),
        }
    }
}

impl MockTransferGateway {
    /// A gateway that accepts everything.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// A gateway whose transport always fails.
    pub fn failing() -> Self {
        Self {
            fail_transport: true,
            ..Self::default()
        }
    }

    /// A gateway that reaches the remote but is refused.
    pub fn refusing() -> Self {
        Self {
            accept: false,
            ..Self::default()
        }
    }

    /// Number of transfers that reached the (mock) wire.
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransferGateway for MockTransferGateway {
    async fn send_transfer(
        &self,
        _from: &Address,
        _to: &Address,
        _amount: u64,
    ) -> Result<bool, LifecycleError> {
        if self.fail_transport {
            return Err(LifecycleError::Transport("mock failure".into()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(self.accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_accepts() {
        let gw = MockTransferGateway::accepting();
        let accepted = gw
            .send_transfer(&"Alice".into(), &"Bob".into(), 3)
            .await
            .unwrap();
        assert!(accepted);
        assert_eq!(gw.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_gateway_transport_failure() {
        let gw = MockTransferGateway::failing();
        let result = gw.send_transfer(&"Alice".into(), &"Bob".into(), 3).await;
        assert!(matches!(result, Err(LifecycleError::Transport(_))));
        assert_eq!(gw.sent_count(), 0);
    }
}
