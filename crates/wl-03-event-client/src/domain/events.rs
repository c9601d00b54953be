//! # Typed Events
//!
//! Inbound frames parsed into a closed tagged enum. Anything that does not
//! match a known `type` tag is a decode failure, dropped and counted by the
//! client rather than surfaced to subscribers.

use super::snapshot::LedgerSnapshot;
use serde::{Deserialize, Serialize};
use shared_types::{Address, TransferIntent};
use std::collections::BTreeMap;

/// Event kinds subscribers can register for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Authoritative full-state frame.
    State,
    /// Round challenge broadcast to witness nodes.
    Challenge,
    /// A node reported a witness correlation.
    Witness,
    /// A round committed a block.
    Commit,
    /// A round produced no block.
    Skip,
    /// The client's connection state changed.
    ConnectionChanged,
    /// Every event regardless of kind.
    Any,
}

/// One inbound event from the witness service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// Full ledger state; replaces the cached snapshot wholesale.
    #[serde(rename = "state")]
    State(LedgerSnapshot),

    /// Round challenge.
    #[serde(rename = "chal")]
    Challenge {
        /// Round number.
        #[serde(default)]
        round: u64,
        /// Challenge seed.
        #[serde(default)]
        seed: u64,
        /// Leader for this round.
        #[serde(rename = "leader", default)]
        leader_id: u64,
        /// Witness window duration.
        #[serde(rename = "durMs", default)]
        duration_ms: u64,
    },

    /// Witness correlation report.
    #[serde(rename = "witness")]
    Witness {
        /// Round number.
        #[serde(default)]
        round: u64,
        /// Reporting node.
        #[serde(rename = "node", default)]
        node_id: u64,
        /// Measured correlation.
        #[serde(rename = "corr", default)]
        correlation: f64,
    },

    /// Block commit.
    #[serde(rename = "commit")]
    Commit {
        /// Round number.
        #[serde(default)]
        round: u64,
        /// Leader that produced the block.
        #[serde(rename = "leader", default)]
        leader_id: u64,
        /// Transfers included in the block.
        #[serde(rename = "includedTx", default)]
        included_transfers: Vec<TransferIntent>,
        /// Balances after applying the block.
        #[serde(default)]
        balances: BTreeMap<Address, u64>,
    },

    /// Round skipped without a block. Older services send a `leader` field
    /// here instead of a reason; unknown fields are ignored.
    #[serde(rename = "skip")]
    Skip {
        /// Round number.
        #[serde(default)]
        round: u64,
        /// Why the round was skipped, when the service says.
        #[serde(default)]
        reason: String,
    },
}

impl LedgerEvent {
    /// The subscription kind this event dispatches to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::State(_) => EventKind::State,
            Self::Challenge { .. } => EventKind::Challenge,
            Self::Witness { .. } => EventKind::Witness,
            Self::Commit { .. } => EventKind::Commit,
            Self::Skip { .. } => EventKind::Skip,
        }
    }
}

/// Operational control command for the remote service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    /// Start the consensus loop.
    Start,
    /// Stop the consensus loop.
    Stop,
    /// Reset balances, mempool and counters.
    Reset,
}
