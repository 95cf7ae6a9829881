// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Storage key construction
//!
//! Keys are case-normalized (addresses lowercased) so the same logical entity
//! never produces two records regardless of how the caller spells an address.

use alloy_primitives::Address;

use crate::types::VaultId;

/// Key for a per-chain vault listing
pub fn chain_vaults(chain_id: u64) -> String {
    chain_id.to_string()
}

/// Key for a per-wallet record (user vaults, favorites)
///
/// Wallet addresses are lowercased; `Address` renders EIP-55 checksummed by
/// default, which would otherwise split one wallet across multiple records.
pub fn wallet(address: Address) -> String {
    address.to_string().to_ascii_lowercase()
}

/// Key for a single vault's detail record
pub fn vault_detail(id: VaultId) -> String {
    id.storage_key()
}

/// Key for a view's pagination state
pub fn view(view_id: &str) -> String {
    view_id.trim().to_string()
}
