//! # Ledger Snapshot
//!
//! The client's reconciled view of remote ledger state.

use serde::{Deserialize, Serialize};
use shared_types::{Address, TransferIntent};
use std::collections::BTreeMap;

/// Remote ledger state as of the last authoritative `state` event or
/// successful poll.
///
/// The snapshot is always replaced wholesale; fields absent from a state
/// frame default to their zero values rather than being merged from the
/// previous snapshot, so readers never observe a torn mix of two states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Current consensus round.
    #[serde(default)]
    pub round: u64,

    /// Leader node for the current round.
    #[serde(rename = "leader", default)]
    pub leader_id: u64,

    /// Committed block height.
    #[serde(rename = "blockHeight", default)]
    pub block_height: u64,

    /// Account balances.
    #[serde(default)]
    pub balances: BTreeMap<Address, u64>,

    /// Transfers awaiting inclusion, in queue order.
    #[serde(default)]
    pub mempool: Vec<TransferIntent>,

    /// Participating node identifiers.
    #[serde(rename = "ports", default)]
    pub participants: Vec<String>,

    /// Witness correlation acceptance threshold, in (0, 1].
    #[serde(rename = "threshold", default)]
    pub acceptance_threshold: f64,
}

impl LedgerSnapshot {
    /// Balance of one account, zero if unknown.
    pub fn balance_of(&self, addr: &str) -> u64 {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    /// Number of transfers waiting in the remote mempool.
    pub fn mempool_depth(&self) -> usize {
        self.mempool.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let snap: LedgerSnapshot = serde_json::from_str(r#"{"round": 4}"#).unwrap();
        assert_eq!(snap.round, 4);
        assert_eq!(snap.leader_id, 0);
        assert_eq!(snap.block_height, 0);
        assert!(snap.balances.is_empty());
        assert!(snap.mempool.is_empty());
        assert!(snap.participants.is_empty());
        assert_eq!(snap.acceptance_threshold, 0.0);
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "round": 12,
            "leader": 1,
            "blockHeight": 7,
            "balances": {"Alice": 97, "Bob": 3},
            "mempool": [{"from": "Alice", "to": "Bob", "amt": 2}],
            "ports": ["node0", "node1"],
            "threshold": 0.6
        }"#;
        let snap: LedgerSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.block_height, 7);
        assert_eq!(snap.balance_of("Alice"), 97);
        assert_eq!(snap.balance_of("Nobody"), 0);
        assert_eq!(snap.mempool_depth(), 1);
        assert_eq!(snap.participants.len(), 2);
        assert_eq!(snap.acceptance_threshold, 0.6);
    }
}
