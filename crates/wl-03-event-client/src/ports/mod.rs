//! # Ports
//!
//! Outbound traits for the push stream and the pull/control plane, plus
//! mock implementations so the client and its tests run transport-free.

use crate::domain::{ClientError, ControlAction, LedgerSnapshot};
use async_trait::async_trait;
use shared_types::TransferIntent;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// One live push-channel connection delivering raw frames sequentially.
#[async_trait]
pub trait EventStream: Send {
    /// Wait for the next raw frame. `Ok(None)` is a clean close; `Err` is a
    /// transport failure. Both put the client back into `Disconnected`.
    async fn next_frame(&mut self) -> Result<Option<String>, ClientError>;
}

/// Outbound port: establishes push-channel connections.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    /// Open a new connection to the event stream.
    async fn connect(&self) -> Result<Box<dyn EventStream>, ClientError>;
}

/// Outbound port: the stateless request/response side of the service.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Pull the full ledger state.
    async fn fetch_state(&self) -> Result<LedgerSnapshot, ClientError>;

    /// Forward a transfer; the flag reports remote acceptance.
    async fn send_transfer(&self, intent: &TransferIntent) -> Result<bool, ClientError>;

    /// Forward an operational control command.
    async fn control(&self, action: ControlAction) -> Result<bool, ClientError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// What a mock stream does once its scripted frames run out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEnd {
    /// Report a clean close.
    Close,
    /// Stay connected and deliver nothing further.
    Hang,
}

/// One scripted connection outcome for [`MockStreamConnector`].
pub enum MockConnection {
    /// Connection succeeds and delivers these frames.
    Frames(Vec<String>, StreamEnd),
    /// Connection attempt is refused.
    Refused,
}

struct MockEventStream {
    frames: VecDeque<String>,
    end: StreamEnd,
}

#[async_trait]
impl EventStream for MockEventStream {
    async fn next_frame(&mut self) -> Result<Option<String>, ClientError> {
        if let Some(frame) = self.frames.pop_front() {
            return Ok(Some(frame));
        }
        match self.end {
            StreamEnd::Close => Ok(None),
            StreamEnd::Hang => std::future::pending().await,
        }
    }
}

/// Mock connector replaying a script of connection outcomes.
///
/// Once the script is exhausted every further attempt is refused, which is
/// exactly what the reconnect-cap tests need.
#[derive(Default)]
pub struct MockStreamConnector {
    script: Mutex<VecDeque<MockConnection>>,
    attempts: Mutex<Vec<Instant>>,
}

impl MockStreamConnector {
    /// A connector that refuses every attempt.
    pub fn always_refusing() -> Self {
        Self::default()
    }

    /// A connector replaying `script` in order, refusing afterwards.
    pub fn with_script(script: Vec<MockConnection>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// A connector whose single successful connection delivers `frames` and
    /// then hangs.
    pub fn delivering(frames: Vec<String>) -> Self {
        Self::with_script(vec![MockConnection::Frames(frames, StreamEnd::Hang)])
    }

    /// Timestamps of every connect attempt, in order.
    pub fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().expect("mock lock poisoned").clone()
    }

    /// Number of connect attempts so far.
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().expect("mock lock poisoned").len()
    }
}

#[async_trait]
impl StreamConnector for MockStreamConnector {
    async fn connect(&self) -> Result<Box<dyn EventStream>, ClientError> {
        self.attempts
            .lock()
            .expect("mock lock poisoned")
            .push(Instant::now());
        let outcome = self
            .script
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or(MockConnection::Refused);
        match outcome {
            MockConnection::Refused => {
                Err(ClientError::Transport("mock connection refused".into()))
            }
            MockConnection::Frames(frames, end) => Ok(Box::new(MockEventStream {
                frames: frames.into(),
                end,
            })),
        }
    }
}

/// Mock pull/control plane for testing.
pub struct MockLedgerApi {
    /// State returned by `fetch_state`.
    pub state: Mutex<LedgerSnapshot>,
    /// Simulate transport failures?
    pub fail: AtomicBool,
    /// Acceptance flag for transfers and controls.
    pub accept: bool,
    transfers: Mutex<Vec<TransferIntent>>,
    controls: Mutex<Vec<ControlAction>>,
}

impl Default for MockLedgerApi {
    fn default() -> Self {
        Self {
            state: Mutex::new(LedgerSnapshot::default()),
            fail: AtomicBool::new(false),
            accept: true,
            transfers: Mutex::new(Vec::new()),
            controls: Mutex::new(Vec::new()),
        }
    }
}

impl MockLedgerApi {
    /// A healthy mock serving `state`.
    pub fn serving(state: LedgerSnapshot) -> Self {
        Self {
            state: Mutex::new(state),
            ..Self::default()
        }
    }

    /// Flip transport failures on or off.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Transfers that reached the (mock) wire.
    pub fn transfers(&self) -> Vec<TransferIntent> {
        self.transfers.lock().expect("mock lock poisoned").clone()
    }

    /// Control actions that reached the (mock) wire.
    pub fn controls(&self) -> Vec<ControlAction> {
        self.controls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl LedgerApi for MockLedgerApi {
    async fn fetch_state(&self) -> Result<LedgerSnapshot, ClientError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("mock failure".into()));
        }
        Ok(self.state.lock().expect("mock lock poisoned").clone())
    }

    async fn send_transfer(&self, intent: &TransferIntent) -> Result<bool, ClientError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("mock failure".into()));
        }
        self.transfers
            .lock()
            .expect("mock lock poisoned")
            .push(intent.clone());
        Ok(self.accept)
    }

    async fn control(&self, action: ControlAction) -> Result<bool, ClientError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("mock failure".into()));
        }
        self.controls
            .lock()
            .expect("mock lock poisoned")
            .push(action);
        Ok(self.accept)
    }
}
