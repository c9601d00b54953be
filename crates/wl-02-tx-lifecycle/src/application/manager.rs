//! # Transaction Lifecycle Manager
//!
//! Orchestrates submission, validation and timer-backed verification jobs.
//!
//! The cached transaction records and the map of active jobs are the only
//! shared mutable state; both sit behind std mutexes that are never held
//! across an await. Cancel and expiry for the same transaction race through
//! a single compare-and-set on the status, so exactly one of them settles
//! the transaction.

use crate::config::LifecycleConfig;
use crate::domain::{
    validate, LifecycleError, Transaction, TransactionStatus, TransferRequest,
};
use crate::ports::TransferGateway;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::{oneshot, watch};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Hook invoked once per transaction when it reaches a terminal state.
pub type CompletionHook = Arc<dyn Fn(&str, TransactionStatus) + Send + Sync>;

/// Point-in-time view of a verification job.
///
/// A zeroed snapshot (not an error) is returned when no job is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerificationStatus {
    /// Is a job currently running for this transaction?
    pub is_verifying: bool,
    /// Elapsed/duration, clamped to [0, 100].
    pub progress_percent: f64,
    /// Milliseconds until expiry.
    pub time_remaining_ms: u64,
}

impl VerificationStatus {
    fn idle() -> Self {
        Self {
            is_verifying: false,
            progress_percent: 0.0,
            time_remaining_ms: 0,
        }
    }
}

/// Handle for one active verification job.
struct VerificationJob {
    started_at: Instant,
    duration: Duration,
    cancel_tx: oneshot::Sender<()>,
    progress_rx: watch::Receiver<f64>,
}

/// Mutex-guarded transaction records with monotonic transitions.
#[derive(Default)]
struct TransactionLedger {
    inner: Mutex<HashMap<String, Transaction>>,
}

impl TransactionLedger {
    fn insert(&self, tx: Transaction) {
        self.inner
            .lock()
            .expect("transaction ledger lock poisoned")
            .insert(tx.id.clone(), tx);
    }

    fn get(&self, id: &str) -> Option<Transaction> {
        self.inner
            .lock()
            .expect("transaction ledger lock poisoned")
            .get(id)
            .cloned()
    }

    /// Apply `current -> next` if the status machine allows it.
    fn transition(&self, id: &str, next: TransactionStatus) -> Result<(), LifecycleError> {
        let mut inner = self.inner.lock().expect("transaction ledger lock poisoned");
        let tx = inner
            .get_mut(id)
            .ok_or_else(|| LifecycleError::UnknownTransaction(id.to_string()))?;
        if !tx.status.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                id: id.to_string(),
                from: tx.status,
                to: next,
            });
        }
        tx.status = next;
        if next == TransactionStatus::Verifying {
            tx.verification_started_at = Some(SystemTime::now());
        }
        if next.is_terminal() {
            tx.completed_at = Some(SystemTime::now());
        }
        Ok(())
    }

    /// Compare-and-set `Verifying -> terminal`. Returns whether this caller
    /// won; a transaction already settled (or never verifying) is left alone.
    fn try_finish(&self, id: &str, terminal: TransactionStatus) -> bool {
        debug_assert!(terminal.is_terminal());
        let mut inner = self.inner.lock().expect("transaction ledger lock poisoned");
        match inner.get_mut(id) {
            Some(tx) if tx.status == TransactionStatus::Verifying => {
                tx.status = terminal;
                tx.completed_at = Some(SystemTime::now());
                true
            }
            _ => false,
        }
    }
}

/// Owns the transaction state machine and the verification job timers.
pub struct TransactionLifecycleManager {
    config: LifecycleConfig,
    gateway: Arc<dyn TransferGateway>,
    ledger: Arc<TransactionLedger>,
    jobs: Arc<Mutex<HashMap<String, VerificationJob>>>,
    completion_hook: Option<CompletionHook>,
}

impl TransactionLifecycleManager {
    /// Create a manager forwarding transfers through `gateway`.
    pub fn new(config: LifecycleConfig, gateway: Arc<dyn TransferGateway>) -> Self {
        Self {
            config,
            gateway,
            ledger: Arc::new(TransactionLedger::default()),
            jobs: Arc::new(Mutex::new(HashMap::new())),
            completion_hook: None,
        }
    }

    /// Install a hook invoked exactly once per transaction on its terminal
    /// transition.
    pub fn with_completion_hook(
        mut self,
        hook: impl Fn(&str, TransactionStatus) + Send + Sync + 'static,
    ) -> Self {
        self.completion_hook = Some(Arc::new(hook));
        self
    }

    /// Validate and submit a transfer.
    ///
    /// The transfer is forwarded to the remote service first; only an
    /// accepted forward creates a transaction record, so a failed submission
    /// leaves nothing behind. On success the transaction moves straight to
    /// `Verifying` with a job running for the configured duration.
    pub async fn submit(&self, request: &TransferRequest) -> Result<String, LifecycleError> {
        let validated =
            validate(request, self.config.max_amount).map_err(LifecycleError::Validation)?;

        let accepted = self
            .gateway
            .send_transfer(&validated.from, &validated.to, validated.amount)
            .await
            .inspect_err(|e| tracing::warn!("Transfer forward failed: {e}"))?;
        if !accepted {
            return Err(LifecycleError::SubmissionRejected);
        }

        let id = Uuid::new_v4().to_string();
        self.ledger.insert(Transaction::new(
            id.clone(),
            validated.from,
            validated.to,
            validated.amount,
        ));
        self.ledger.transition(&id, TransactionStatus::Verifying)?;
        self.begin_verification_job(&id, self.config.verification_duration_ms)?;
        Ok(id)
    }

    /// Start the timer-backed verification job for a transaction.
    ///
    /// At most one job may be active per id; a second start reports
    /// `DuplicateVerification` and leaves the running job untouched. On
    /// expiry the job settles the transaction as `Completed` unless cancel
    /// or a remote confirmation got there first.
    pub fn begin_verification_job(
        &self,
        id: &str,
        duration_ms: u64,
    ) -> Result<(), LifecycleError> {
        if self.ledger.get(id).is_none() {
            return Err(LifecycleError::UnknownTransaction(id.to_string()));
        }

        let mut jobs = self.jobs.lock().expect("jobs lock poisoned");
        if jobs.contains_key(id) {
            return Err(LifecycleError::DuplicateVerification(id.to_string()));
        }

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let (progress_tx, progress_rx) = watch::channel(0.0f64);
        let started_at = Instant::now();
        let duration = Duration::from_millis(duration_ms);

        let ledger = Arc::clone(&self.ledger);
        let jobs_map = Arc::clone(&self.jobs);
        let hook = self.completion_hook.clone();
        let tick = Duration::from_millis(self.config.progress_tick_ms.max(1));
        let tx_id = id.to_string();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        // cancel() did the bookkeeping; just stop ticking.
                        return;
                    }
                    _ = interval.tick() => {
                        let elapsed = started_at.elapsed();
                        let pct = (elapsed.as_secs_f64() / duration.as_secs_f64() * 100.0)
                            .clamp(0.0, 100.0);
                        let _ = progress_tx.send(pct);

                        if elapsed >= duration {
                            if ledger.try_finish(&tx_id, TransactionStatus::Completed) {
                                tracing::debug!("Transaction {tx_id} completed on expiry");
                                if let Some(hook) = &hook {
                                    hook(&tx_id, TransactionStatus::Completed);
                                }
                            }
                            jobs_map.lock().expect("jobs lock poisoned").remove(&tx_id);
                            return;
                        }
                    }
                }
            }
        });

        jobs.insert(
            id.to_string(),
            VerificationJob {
                started_at,
                duration,
                cancel_tx,
                progress_rx,
            },
        );
        Ok(())
    }

    /// Cancel an active verification job and settle the transaction as
    /// `Cancelled`.
    ///
    /// Returns false when no job is active or when a racing expiry already
    /// settled the transaction; exactly one of cancel and expiry wins.
    pub fn cancel(&self, id: &str) -> bool {
        let job = self.jobs.lock().expect("jobs lock poisoned").remove(id);
        let Some(job) = job else {
            return false;
        };
        let _ = job.cancel_tx.send(());

        let won = self.ledger.try_finish(id, TransactionStatus::Cancelled);
        if won {
            if let Some(hook) = &self.completion_hook {
                hook(id, TransactionStatus::Cancelled);
            }
        }
        won
    }

    /// Settle a transaction from a remote confirmation, stopping its timer.
    ///
    /// Returns whether this confirmation won the settle (false when the
    /// timer or a cancel got there first).
    pub fn confirm(&self, id: &str, success: bool) -> bool {
        if let Some(job) = self.jobs.lock().expect("jobs lock poisoned").remove(id) {
            let _ = job.cancel_tx.send(());
        }
        let terminal = if success {
            TransactionStatus::Completed
        } else {
            TransactionStatus::Failed
        };
        let won = self.ledger.try_finish(id, terminal);
        if won {
            if let Some(hook) = &self.completion_hook {
                hook(id, terminal);
            }
        }
        won
    }

    /// Non-failing read of job state; zeroed snapshot when no job is active.
    pub fn status(&self, id: &str) -> VerificationStatus {
        let jobs = self.jobs.lock().expect("jobs lock poisoned");
        match jobs.get(id) {
            None => VerificationStatus::idle(),
            Some(job) => {
                let elapsed = job.started_at.elapsed();
                VerificationStatus {
                    is_verifying: true,
                    progress_percent: (elapsed.as_secs_f64() / job.duration.as_secs_f64()
                        * 100.0)
                        .clamp(0.0, 100.0),
                    time_remaining_ms: job.duration.saturating_sub(elapsed).as_millis() as u64,
                }
            }
        }
    }

    /// Subscribe to a job's periodic progress publications (percent).
    pub fn progress(&self, id: &str) -> Option<watch::Receiver<f64>> {
        self.jobs
            .lock()
            .expect("jobs lock poisoned")
            .get(id)
            .map(|job| job.progress_rx.clone())
    }

    /// Read a transaction record.
    pub fn transaction(&self, id: &str) -> Option<Transaction> {
        self.ledger.get(id)
    }
}
