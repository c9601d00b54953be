//! # Ledger Event Client
//!
//! Combines the push event stream with the pull/control plane behind one
//! coherent, eventually-consistent view.
//!
//! The client is an owned context object with explicit `connect()` and
//! `dispose()`, injected into consumers; tests construct independent
//! instances over mock transports. The cached snapshot and the handler
//! registry are the only shared mutable state, both behind std mutexes that
//! are never held across an await.

use crate::config::ClientConfig;
use crate::domain::{
    connection::reconnect_delay, ClientError, ConnectionState, ControlAction, EventKind,
    LedgerEvent, LedgerSnapshot,
};
use crate::ports::{LedgerApi, StreamConnector};
use shared_types::TransferIntent;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// What subscribers receive: a parsed ledger event or a connection change.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// A parsed inbound event.
    Ledger(LedgerEvent),
    /// The push channel changed connection state.
    ConnectionChanged(ConnectionState),
}

impl ClientEvent {
    /// The subscription kind this event dispatches to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ledger(event) => event.kind(),
            Self::ConnectionChanged(_) => EventKind::ConnectionChanged,
        }
    }
}

/// Opaque handle identifying one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&ClientEvent) + Send + Sync>;

/// Registration-ordered handler registry with panic isolation.
#[derive(Default)]
struct HandlerRegistry {
    handlers: Mutex<Vec<(EventKind, HandlerId, Handler)>>,
    next_id: AtomicU64,
}

impl HandlerRegistry {
    fn subscribe(&self, kind: EventKind, handler: Handler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers
            .lock()
            .expect("handler registry lock poisoned")
            .push((kind, id, handler));
        id
    }

    fn unsubscribe(&self, kind: EventKind, id: HandlerId) -> bool {
        let mut handlers = self
            .handlers
            .lock()
            .expect("handler registry lock poisoned");
        let before = handlers.len();
        handlers.retain(|(k, h, _)| !(*k == kind && *h == id));
        handlers.len() != before
    }

    /// Dispatch to the event's own kind first, then to `Any` subscribers.
    /// A panicking handler is contained so the rest of the dispatch runs.
    fn dispatch(&self, event: &ClientEvent) {
        let kind = event.kind();
        for target in [kind, EventKind::Any] {
            let selected: Vec<Handler> = {
                let handlers = self
                    .handlers
                    .lock()
                    .expect("handler registry lock poisoned");
                handlers
                    .iter()
                    .filter(|(k, _, _)| *k == target)
                    .map(|(_, _, h)| Arc::clone(h))
                    .collect()
            };
            for handler in selected {
                if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                    tracing::warn!("Subscriber panicked during {kind:?} dispatch");
                }
            }
        }
    }
}

/// State shared between the client and its connection loop task.
struct ClientShared {
    registry: HandlerRegistry,
    snapshot: Mutex<Option<LedgerSnapshot>>,
    state: Mutex<ConnectionState>,
    decode_failures: AtomicU64,
    consecutive_skips: AtomicU64,
}

impl ClientShared {
    fn new() -> Self {
        Self {
            registry: HandlerRegistry::default(),
            snapshot: Mutex::new(None),
            state: Mutex::new(ConnectionState::Disconnected),
            decode_failures: AtomicU64::new(0),
            consecutive_skips: AtomicU64::new(0),
        }
    }

    fn set_state(&self, next: ConnectionState) {
        {
            let mut state = self.state.lock().expect("connection state lock poisoned");
            if *state == next {
                return;
            }
            *state = next;
        }
        self.registry.dispatch(&ClientEvent::ConnectionChanged(next));
    }

    /// Parse and dispatch one raw frame. Malformed frames are dropped and
    /// counted; subscribers never see them.
    fn on_message(&self, raw: &str) {
        let event: LedgerEvent = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                self.decode_failures.fetch_add(1, Ordering::SeqCst);
                tracing::warn!("Dropped undecodable frame: {e}");
                return;
            }
        };

        match &event {
            LedgerEvent::State(snap) => {
                // Wholesale replace; missing fields already defaulted by the
                // parse, so no stale data leaks through.
                *self.snapshot.lock().expect("snapshot lock poisoned") = Some(snap.clone());
            }
            LedgerEvent::Commit { .. } => {
                self.consecutive_skips.store(0, Ordering::SeqCst);
            }
            LedgerEvent::Skip { .. } => {
                self.consecutive_skips.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }

        self.registry.dispatch(&ClientEvent::Ledger(event));
    }
}

/// Push + pull client over the remote witness service.
pub struct LedgerEventClient {
    config: ClientConfig,
    connector: Arc<dyn StreamConnector>,
    api: Arc<dyn LedgerApi>,
    shared: Arc<ClientShared>,
    shutdown_tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl LedgerEventClient {
    /// Create a client over explicit transports.
    pub fn new(
        config: ClientConfig,
        connector: Arc<dyn StreamConnector>,
        api: Arc<dyn LedgerApi>,
    ) -> Self {
        Self {
            config,
            connector,
            api,
            shared: Arc::new(ClientShared::new()),
            shutdown_tx: Mutex::new(None),
        }
    }

    /// Create a client over the real WebSocket + HTTP transports from the
    /// config's endpoints.
    pub fn with_default_transports(config: ClientConfig) -> Self {
        let connector = Arc::new(crate::adapters::WsStreamConnector::new(
            config.ws_url.clone(),
        ));
        let api = Arc::new(crate::adapters::HttpLedgerApi::new(
            config.http_url.clone(),
            config.request_timeout_secs,
        ));
        Self::new(config, connector, api)
    }

    /// Start (or manually restart after the reconnect cap) the push channel.
    ///
    /// Any previous connection loop is torn down first, so calling this
    /// repeatedly is safe.
    pub fn connect(&self) {
        self.dispose();

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        *self
            .shutdown_tx
            .lock()
            .expect("shutdown channel lock poisoned") = Some(shutdown_tx);

        tokio::spawn(Self::connection_loop(
            Arc::clone(&self.connector),
            Arc::clone(&self.shared),
            Duration::from_millis(self.config.base_delay_ms),
            self.config.max_reconnect_attempts,
            shutdown_rx,
        ));
    }

    /// Tear down the push channel. Idempotent.
    pub fn dispose(&self) {
        if let Some(tx) = self
            .shutdown_tx
            .lock()
            .expect("shutdown channel lock poisoned")
            .take()
        {
            let _ = tx.try_send(());
        }
    }

    /// Connection loop: one connect per iteration, linear-backoff reconnect
    /// after an unexpected drop, hard stop after the attempt cap.
    async fn connection_loop(
        connector: Arc<dyn StreamConnector>,
        shared: Arc<ClientShared>,
        base_delay: Duration,
        max_attempts: u32,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut attempt: u32 = 0;

        loop {
            shared.set_state(ConnectionState::Connecting);
            match connector.connect().await {
                Ok(mut stream) => {
                    attempt = 0;
                    shared.set_state(ConnectionState::Connected);
                    loop {
                        tokio::select! {
                            _ = shutdown_rx.recv() => {
                                shared.set_state(ConnectionState::Disconnected);
                                return;
                            }
                            frame = stream.next_frame() => match frame {
                                Ok(Some(raw)) => shared.on_message(&raw),
                                Ok(None) => {
                                    tracing::debug!("Event stream closed by remote");
                                    break;
                                }
                                Err(e) => {
                                    tracing::warn!("Event stream error: {e}");
                                    break;
                                }
                            }
                        }
                    }
                    shared.set_state(ConnectionState::Disconnected);
                }
                Err(e) => {
                    tracing::warn!("Connect failed: {e}");
                    shared.set_state(ConnectionState::Disconnected);
                }
            }

            attempt += 1;
            if attempt > max_attempts {
                tracing::warn!(
                    "Stopping automatic reconnects after {max_attempts} attempts; \
                     call connect() to retry"
                );
                return;
            }

            let delay = reconnect_delay(base_delay, attempt);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown_rx.recv() => return,
            }
        }
    }

    /// Register a handler for one event kind. Dispatch is registration
    /// order; `EventKind::Any` receives every event.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&ClientEvent) + Send + Sync + 'static,
    ) -> HandlerId {
        self.shared.registry.subscribe(kind, Arc::new(handler))
    }

    /// Remove a previously registered handler.
    pub fn unsubscribe(&self, kind: EventKind, id: HandlerId) -> bool {
        self.shared.registry.unsubscribe(kind, id)
    }

    /// Feed one raw frame through the same path the push channel uses.
    pub fn on_message(&self, raw: &str) {
        self.shared.on_message(raw);
    }

    /// Pull the full ledger state, replacing the cache on success.
    ///
    /// On transport failure the last cached snapshot is returned if one
    /// exists; otherwise `NoCachedState`.
    pub async fn fetch_snapshot(&self) -> Result<LedgerSnapshot, ClientError> {
        match self.api.fetch_state().await {
            Ok(snap) => {
                *self
                    .shared
                    .snapshot
                    .lock()
                    .expect("snapshot lock poisoned") = Some(snap.clone());
                Ok(snap)
            }
            Err(e) => {
                tracing::warn!("Snapshot pull failed, falling back to cache: {e}");
                self.shared
                    .snapshot
                    .lock()
                    .expect("snapshot lock poisoned")
                    .clone()
                    .ok_or(ClientError::NoCachedState)
            }
        }
    }

    /// Forward a transfer request. The cached snapshot is not touched; it
    /// updates only via subsequent `state` events, so callers must not
    /// assume immediate consistency.
    pub async fn send_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<bool, ClientError> {
        if amount == 0 {
            // The remote would refuse this with a 400; don't bother the wire.
            return Ok(false);
        }
        self.api
            .send_transfer(&TransferIntent::new(from, to, amount))
            .await
    }

    /// Forward a mint request (no sender account).
    pub async fn send_mint(&self, to: &str, amount: u64) -> Result<bool, ClientError> {
        if amount == 0 {
            return Ok(false);
        }
        self.api.send_transfer(&TransferIntent::mint(to, amount)).await
    }

    /// Forward an operational control command. Fire-and-forget: the remote
    /// effect is only observable via later `state` events.
    pub async fn control_remote(&self, action: ControlAction) -> Result<bool, ClientError> {
        self.api.control(action).await
    }

    /// Synchronous read of the last cached snapshot; never performs I/O.
    pub fn snapshot(&self) -> Option<LedgerSnapshot> {
        self.shared
            .snapshot
            .lock()
            .expect("snapshot lock poisoned")
            .clone()
    }

    /// Current connection state of the push channel.
    pub fn connection_state(&self) -> ConnectionState {
        *self
            .shared
            .state
            .lock()
            .expect("connection state lock poisoned")
    }

    /// Frames dropped because they failed to decode.
    pub fn decode_failures(&self) -> u64 {
        self.shared.decode_failures.load(Ordering::SeqCst)
    }

    /// `skip` events observed since the last `commit`.
    pub fn consecutive_skips(&self) -> u64 {
        self.shared.consecutive_skips.load(Ordering::SeqCst)
    }
}

impl Drop for LedgerEventClient {
    fn drop(&mut self) {
        self.dispose();
    }
}
