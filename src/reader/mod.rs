// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain read/write client for vault contracts
//!
//! [`VaultReader`] is the seam between the orchestrator and the chain: the
//! orchestrator only ever sees this trait, which keeps the read-through logic
//! testable without a blockchain connection. [`ContractClient`] is the real
//! implementation over alloy providers.
//!
//! Listings and details are cacheable and immutable once fetched. Figures
//! (prices, fees, balances) are live: they change block to block and are
//! never written to the cache.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::errors::RpcError;
use crate::types::{VaultDetail, VaultId, VaultSummary};

mod abi;
mod contract;

pub use contract::{ContractClient, Deployment};

/// Live per-vault figures, read fresh from the chain on every call
///
/// Account-scoped fields are only populated when the caller passes a wallet
/// address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFigures {
    /// Current price per share on the vault's curve
    pub price: U256,
    /// Current fee rate, in basis points
    pub fee_rate: U256,
    /// Total amount of the coin staked in the vault
    pub total_staked: U256,
    /// Amount the account has staked, if an account was given
    pub staked_balance: Option<U256>,
    /// Rewards claimable by the account, if an account was given
    pub pending_rewards: Option<U256>,
    /// The account's un-staked coin balance, if an account was given
    pub wallet_balance: Option<U256>,
}

/// Read surface over the vault contracts
///
/// Implementations must be thread-safe; the orchestrator shares one reader
/// across every in-flight load. Errors use [`RpcError`] so provider-missing
/// conditions stay distinguishable from calls that were attempted and
/// failed.
#[async_trait]
pub trait VaultReader: Send + Sync {
    /// Lists every vault registered on a chain
    async fn chain_vaults(&self, chain_id: u64) -> Result<Vec<VaultSummary>, RpcError>;

    /// Lists vaults created by a wallet, across all configured chains
    async fn user_vaults(&self, owner: Address) -> Result<Vec<VaultSummary>, RpcError>;

    /// Lists vaults a wallet marked as favorite, across all configured chains
    ///
    /// The chain is the source of truth for favorites; the local cache is a
    /// read cache only.
    async fn favorite_vaults(&self, owner: Address) -> Result<Vec<VaultSummary>, RpcError>;

    /// Reads full metadata for a single vault
    async fn vault_detail(&self, id: VaultId) -> Result<VaultDetail, RpcError>;

    /// Reads live figures for a vault; never cached
    async fn vault_figures(
        &self,
        id: VaultId,
        account: Option<Address>,
    ) -> Result<VaultFigures, RpcError>;
}
