//! # Domain Entities
//!
//! The `Block` entry and the append-only `Chain` that stores it.

use super::errors::ChainError;
use super::value_objects::{PolicyWindow, Proposal};
use crate::digest::{compute_digest, is_within_policy, verify, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Genesis `prev_digest` protocol constant.
pub const GENESIS_PREV_DIGEST: f64 = 0.42;

/// Genesis `root_value` protocol constant.
pub const GENESIS_ROOT_VALUE: f64 = 0.35;

/// Genesis `digest` protocol constant.
pub const GENESIS_DIGEST: f64 = 0.50;

/// Default `root_value` shift applied by the tamper demo hook.
pub const DEFAULT_TAMPER_DELTA: f64 = 0.1;

/// One ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Monotonic id, starting at 1 for genesis.
    pub id: u64,
    /// Digest of the predecessor at append time.
    pub prev_digest: f64,
    /// Aggregate of the enabled inputs.
    pub root_value: f64,
    /// Caller-supplied counter.
    pub sequence: u64,
    /// Digest derived from the three fields above plus the policy center.
    pub digest: f64,
    /// Advisory validity flag from the policy evaluation at creation or the
    /// most recent re-verification.
    pub is_valid: bool,
}

impl Block {
    /// The fixed genesis block. Its digest is a protocol constant, not a
    /// derived value, so genesis is exempt from re-verification.
    pub fn genesis() -> Self {
        Self {
            id: 1,
            prev_digest: GENESIS_PREV_DIGEST,
            root_value: GENESIS_ROOT_VALUE,
            sequence: 0,
            digest: GENESIS_DIGEST,
            is_valid: true,
        }
    }
}

/// Append-only block chain.
///
/// There is no rollback; the only way back is a full reset to genesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain holding only the genesis block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::genesis()],
        }
    }

    /// The current head (never absent; genesis is always present).
    pub fn head(&self) -> &Block {
        self.blocks.last().expect("chain always holds genesis")
    }

    /// All blocks, oldest first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Look up a block by id.
    pub fn get(&self, block_id: u64) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Number of blocks including genesis.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for the conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Evaluate what the next block would look like without mutating the
    /// chain.
    pub fn propose(&self, root_value: f64, sequence: u64, policy: &PolicyWindow) -> Proposal {
        let digest = compute_digest(self.head().digest, root_value, sequence, policy.center);
        Proposal {
            digest,
            is_valid: is_within_policy(digest, policy),
        }
    }

    /// Build and append the next block against the current head.
    ///
    /// Validity is advisory metadata: an invalid block is still appended, and
    /// it is the caller's choice to reject it beforehand via `propose`.
    pub fn append(&mut self, root_value: f64, sequence: u64, policy: &PolicyWindow) -> &Block {
        let proposal = self.propose(root_value, sequence, policy);
        let block = Block {
            id: self.head().id + 1,
            prev_digest: self.head().digest,
            root_value,
            sequence,
            digest: proposal.digest,
            is_valid: proposal.is_valid,
        };
        self.blocks.push(block);
        self.head()
    }

    /// Re-derive every non-genesis block's validity flag against the current
    /// policy center, using the default verification tolerance.
    ///
    /// Only `is_valid` changes; digests and root values are untouched, so
    /// running this twice with the same center is idempotent.
    pub fn reverify(&mut self, policy_center: f64) {
        for block in self.blocks.iter_mut().skip(1) {
            block.is_valid = verify(block, policy_center, DEFAULT_TOLERANCE);
        }
    }

    /// Demo hook: corrupt a block's `root_value` by `delta`, clamped to 1.0.
    ///
    /// Descendants keep the `prev_digest` they were appended with, so a later
    /// `reverify` flags only the tampered block itself. The missing cascade
    /// is an intentional demonstration of the model's limits.
    pub fn tamper(&mut self, block_id: u64, delta: f64) -> Result<(), ChainError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or(ChainError::BlockNotFound(block_id))?;
        block.root_value = (block.root_value + delta).min(1.0);
        Ok(())
    }

    /// Drop everything back to the genesis block.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.blocks.push(Block::genesis());
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
