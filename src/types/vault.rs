// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Vault identity and payload types
//!
//! A vault is an external staking contract identified by `(chain id, address)`.
//! The summary and detail payloads below are what the chain hands back for a
//! vault; both are immutable once fetched (addresses, names and symbols never
//! change on-chain), which is what makes them safe to cache at all. Live
//! figures (price, fees, balances) are deliberately NOT part of these types.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite identity of a vault: the chain it is deployed on plus its address
///
/// Used as the cache key for per-vault detail records. The `Display` form is
/// `"<chain id>:<lowercase address>"`, which doubles as the storage key so the
/// same vault referenced with different address casing never produces two
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultId {
    pub chain_id: u64,
    pub vault_address: Address,
}

impl VaultId {
    /// Creates a vault identity from a chain id and vault contract address
    pub fn new(chain_id: u64, vault_address: Address) -> Self {
        Self {
            chain_id,
            vault_address,
        }
    }

    /// Case-normalized storage key for this vault
    pub fn storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:#x}", self.chain_id, self.vault_address)
    }
}

/// One row of a vault listing
///
/// Summaries are what the chain-wide, per-user and favorites listings are made
/// of. `chain_id` is carried on each row because user and favorites listings
/// aggregate vaults across every configured chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSummary {
    /// Chain the vault is deployed on
    pub chain_id: u64,
    /// Address of the vault contract
    pub vault_address: Address,
    /// Name of the staked coin (ERC-20 `name()`)
    pub coin_name: String,
    /// Symbol of the staked coin (ERC-20 `symbol()`)
    pub coin_symbol: String,
    /// Address of the staked coin contract
    pub coin_address: Address,
}

impl VaultSummary {
    /// Identity of the vault this summary describes
    pub fn id(&self) -> VaultId {
        VaultId::new(self.chain_id, self.vault_address)
    }
}

/// Full metadata for a single vault
///
/// Cached per `(vault address, chain id)`. Everything here is fixed at vault
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDetail {
    /// Address of the staked coin contract
    pub coin_address: Address,
    /// Name of the staked coin
    pub coin_name: String,
    /// Symbol of the staked coin
    pub coin_symbol: String,
    /// Symbol of the vault's receipt token (e.g. `hTST` for `TST`)
    pub hodl_symbol: String,
    /// Decimals of the staked coin
    pub decimals: u8,
    /// Address that created the vault
    pub creator: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn vault_id_display_is_lowercase() {
        // Checksummed input, lowercase key
        let id = VaultId::new(
            8453,
            address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
        );
        let key = id.storage_key();
        assert_eq!(key, "8453:0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(key, key.to_ascii_lowercase());
    }

    #[test]
    fn summary_id_round_trip() {
        let summary = VaultSummary {
            chain_id: 8453,
            vault_address: address!("00000000000000000000000000000000000000aa"),
            coin_name: "Test".to_string(),
            coin_symbol: "TST".to_string(),
            coin_address: address!("00000000000000000000000000000000000000bb"),
        };
        assert_eq!(
            summary.id(),
            VaultId::new(8453, summary.vault_address)
        );
    }

    #[test]
    fn summary_serde_round_trip() {
        let summary = VaultSummary {
            chain_id: 8453,
            vault_address: address!("00000000000000000000000000000000000000aa"),
            coin_name: "Test".to_string(),
            coin_symbol: "TST".to_string(),
            coin_address: address!("00000000000000000000000000000000000000bb"),
        };

        let json = serde_json::to_value(&summary).unwrap();
        let back: VaultSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }
}
