//! # Shared Entities
//!
//! Account addresses and transfer intents as they appear on the wire.

use serde::{Deserialize, Serialize};

/// Account address. The witness service identifies accounts by short
/// human-readable names ("Alice", "Treasury"), so this is a string alias
/// rather than a fixed-width byte array.
pub type Address = String;

/// Maximum transfer amount accepted by the lifecycle manager.
pub const MAX_TRANSFER_AMOUNT: u64 = 1000;

/// Maximum address length accepted by validation.
pub const MAX_ADDRESS_LEN: usize = 32;

/// Check that an address is syntactically well-formed: non-empty, within the
/// length limit, and limited to alphanumerics plus `-` and `_`.
pub fn is_well_formed_address(addr: &str) -> bool {
    !addr.is_empty()
        && addr.len() <= MAX_ADDRESS_LEN
        && addr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A transfer intent as carried in the remote mempool and on the transfer
/// endpoint. `from` is absent for mints (the service credits from Treasury).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Sender address; `None` for mint-style transfers.
    #[serde(default)]
    pub from: Option<Address>,
    /// Recipient address.
    pub to: Address,
    /// Amount in whole units.
    #[serde(rename = "amt")]
    pub amount: u64,
}

impl TransferIntent {
    /// Create a transfer intent between two accounts.
    pub fn new(from: impl Into<Address>, to: impl Into<Address>, amount: u64) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
            amount,
        }
    }

    /// Create a mint intent (no sender).
    pub fn mint(to: impl Into<Address>, amount: u64) -> Self {
        Self {
            from: None,
            to: to.into(),
            amount,
        }
    }
}
