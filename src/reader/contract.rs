// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-backed implementation of the vault read/write client
//!
//! All reads go through per-chain pooled providers. Summary assembly fans out
//! with `futures::join_all`; when the provider is configured with Alloy's
//! `CallBatchLayer`, those parallel `eth_call`s collapse into a single
//! Multicall3 request.

use alloy_chains::Chain;
use alloy_erc20_full::LazyToken;
use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::future::IntoFuture;
use tracing::{debug, info};

use super::abi::{IERC20Metadata, IHodlVault, IVaultFactory};
use super::{VaultFigures, VaultReader};
use crate::errors::RpcError;
use crate::provider::{AnyHttpProvider, ChainEndpoint, ProviderPool};
use crate::types::{VaultDetail, VaultId, VaultSummary};

/// Per-chain deployment of the vault protocol
///
/// Pairs a chain's RPC endpoint with the address of its vault factory.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// The chain this deployment lives on
    pub chain: Chain,
    /// Address of the vault factory contract
    pub factory: Address,
    /// RPC endpoint URL for the chain
    pub rpc_url: String,
    /// Optional rate limit for the chain's provider
    pub rate_limit: Option<u32>,
}

impl Deployment {
    /// Creates a deployment for a chain id
    pub fn new(chain_id: u64, factory: Address, rpc_url: impl Into<String>) -> Self {
        Self {
            chain: Chain::from_id(chain_id),
            factory,
            rpc_url: rpc_url.into(),
            rate_limit: None,
        }
    }

    /// Sets a rate limit for this chain's provider
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }
}

/// Contract-call client over the configured chain deployments
///
/// Implements [`VaultReader`] for the orchestrator's read path and offers the
/// write operations (stake/unstake/claim/favorite) the view layer submits
/// directly. Stateless between calls: each call resolves its provider from
/// the pool and stands alone.
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::{ContractClient, Deployment};
/// use alloy_primitives::address;
///
/// let client = ContractClient::new(vec![
///     Deployment::new(
///         8453,
///         address!("1234567890abcdef1234567890abcdef12345678"),
///         "https://mainnet.base.org",
///     )
///     .with_rate_limit(10),
/// ])?;
/// ```
#[derive(Debug)]
pub struct ContractClient {
    pool: ProviderPool,
    factories: HashMap<u64, Address>,
}

impl ContractClient {
    /// Builds a client from per-chain deployments
    ///
    /// # Errors
    ///
    /// Returns an error if any RPC endpoint URL is invalid.
    pub fn new(deployments: Vec<Deployment>) -> Result<Self, RpcError> {
        let mut factories = HashMap::new();
        let mut endpoints = Vec::with_capacity(deployments.len());

        for deployment in deployments {
            factories.insert(deployment.chain.id(), deployment.factory);
            let mut endpoint = ChainEndpoint::new(deployment.chain, deployment.rpc_url);
            endpoint.rate_limit = deployment.rate_limit;
            endpoints.push(endpoint);
        }

        let pool = ProviderPool::from_endpoints(endpoints, None)?;
        Ok(Self { pool, factories })
    }

    /// Chain ids this client can reach, in ascending order
    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolves the provider and factory address for a chain
    fn deployment(&self, chain_id: u64) -> Result<(AnyHttpProvider, Address), RpcError> {
        let provider = self
            .pool
            .get_by_id(chain_id)
            .ok_or(RpcError::NoProviderForChain { chain_id })?;
        let factory = self
            .factories
            .get(&chain_id)
            .copied()
            .ok_or(RpcError::NoProviderForChain { chain_id })?;
        Ok(((*provider).clone(), factory))
    }

    /// Assembles the summary for one vault: its coin plus the coin's metadata
    async fn summarize(
        &self,
        chain_id: u64,
        provider: &AnyHttpProvider,
        vault_address: Address,
    ) -> Result<VaultSummary, RpcError> {
        let vault = IHodlVault::new(vault_address, provider.clone());
        let coin_address = vault
            .coin()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed("coin", e))?;

        let coin = IERC20Metadata::new(coin_address, provider.clone());
        let name_builder = coin.name();
        let symbol_builder = coin.symbol();
        let (name, symbol) = futures::join!(
            name_builder.call().into_future(),
            symbol_builder.call().into_future()
        );

        Ok(VaultSummary {
            chain_id,
            vault_address,
            coin_name: name.map_err(|e| RpcError::contract_call_failed("name", e))?,
            coin_symbol: symbol.map_err(|e| RpcError::contract_call_failed("symbol", e))?,
            coin_address,
        })
    }

    /// Summarizes a list of vault addresses in parallel
    async fn summarize_all(
        &self,
        chain_id: u64,
        provider: &AnyHttpProvider,
        vaults: Vec<Address>,
    ) -> Result<Vec<VaultSummary>, RpcError> {
        if vaults.is_empty() {
            return Ok(Vec::new());
        }

        debug!(chain_id, count = vaults.len(), "Summarizing vaults");
        let results = join_all(
            vaults
                .into_iter()
                .map(|vault| self.summarize(chain_id, provider, vault)),
        )
        .await;

        results.into_iter().collect()
    }

    /// Reads a wallet-scoped listing (created or favorited vaults) from
    /// every configured chain
    async fn wallet_listing(
        &self,
        owner: Address,
        favorites: bool,
    ) -> Result<Vec<VaultSummary>, RpcError> {
        let chain_ids = self.chain_ids();
        if chain_ids.is_empty() {
            return Err(RpcError::NoChainsConfigured);
        }

        let per_chain = join_all(chain_ids.into_iter().map(|chain_id| async move {
            let (provider, factory_address) = self.deployment(chain_id)?;
            let factory = IVaultFactory::new(factory_address, provider.clone());

            let vaults = if favorites {
                factory
                    .favoritesOf(owner)
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("favoritesOf", e))?
            } else {
                factory
                    .vaultsOf(owner)
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("vaultsOf", e))?
            };

            self.summarize_all(chain_id, &provider, vaults).await
        }))
        .await;

        let mut summaries = Vec::new();
        for result in per_chain {
            summaries.extend(result?);
        }
        Ok(summaries)
    }
}

#[async_trait]
impl VaultReader for ContractClient {
    async fn chain_vaults(&self, chain_id: u64) -> Result<Vec<VaultSummary>, RpcError> {
        let (provider, factory_address) = self.deployment(chain_id)?;
        let factory = IVaultFactory::new(factory_address, provider.clone());

        let count = factory
            .vaultCount()
            .call()
            .await
            .map_err(|e| RpcError::contract_call_failed("vaultCount", e))?;
        let count = u64::try_from(count).map_err(|_| {
            RpcError::invalid_response("vaultCount", format!("count {count} exceeds u64"))
        })?;

        debug!(chain_id, count, "Listing chain vaults");

        let addresses = join_all((0..count).map(|index| {
            let factory = &factory;
            async move {
                factory
                    .vaultAt(U256::from(index))
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("vaultAt", e))
            }
        }))
        .await
        .into_iter()
        .collect::<Result<Vec<Address>, RpcError>>()?;

        self.summarize_all(chain_id, &provider, addresses).await
    }

    async fn user_vaults(&self, owner: Address) -> Result<Vec<VaultSummary>, RpcError> {
        self.wallet_listing(owner, false).await
    }

    async fn favorite_vaults(&self, owner: Address) -> Result<Vec<VaultSummary>, RpcError> {
        self.wallet_listing(owner, true).await
    }

    async fn vault_detail(&self, id: VaultId) -> Result<VaultDetail, RpcError> {
        let (provider, _) = self.deployment(id.chain_id)?;
        let vault = IHodlVault::new(id.vault_address, provider.clone());

        let coin_builder = vault.coin();
        let creator_builder = vault.creator();
        let hodl_symbol_builder = vault.hodlSymbol();
        let (coin_address, creator, hodl_symbol) = futures::join!(
            coin_builder.call().into_future(),
            creator_builder.call().into_future(),
            hodl_symbol_builder.call().into_future(),
        );
        let coin_address = coin_address.map_err(|e| RpcError::contract_call_failed("coin", e))?;

        let coin = IERC20Metadata::new(coin_address, provider.clone());
        let name_builder = coin.name();
        let symbol_builder = coin.symbol();
        let decimals_builder = coin.decimals();
        let (name, symbol, decimals) = futures::join!(
            name_builder.call().into_future(),
            symbol_builder.call().into_future(),
            decimals_builder.call().into_future(),
        );

        Ok(VaultDetail {
            coin_address,
            coin_name: name.map_err(|e| RpcError::contract_call_failed("name", e))?,
            coin_symbol: symbol.map_err(|e| RpcError::contract_call_failed("symbol", e))?,
            hodl_symbol: hodl_symbol
                .map_err(|e| RpcError::contract_call_failed("hodlSymbol", e))?,
            decimals: decimals.map_err(|e| RpcError::contract_call_failed("decimals", e))?,
            creator: creator.map_err(|e| RpcError::contract_call_failed("creator", e))?,
        })
    }

    async fn vault_figures(
        &self,
        id: VaultId,
        account: Option<Address>,
    ) -> Result<VaultFigures, RpcError> {
        let (provider, _) = self.deployment(id.chain_id)?;
        let vault = IHodlVault::new(id.vault_address, provider.clone());

        let price_builder = vault.price();
        let fee_rate_builder = vault.feeRate();
        let total_staked_builder = vault.totalStaked();
        let (price, fee_rate, total_staked) = futures::join!(
            price_builder.call().into_future(),
            fee_rate_builder.call().into_future(),
            total_staked_builder.call().into_future(),
        );

        let (staked_balance, pending_rewards, wallet_balance) = match account {
            Some(account) => {
                let coin_address = vault
                    .coin()
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("coin", e))?;
                let token = LazyToken::new(coin_address, provider.clone());

                let staked_builder = vault.stakedBalanceOf(account);
                let rewards_builder = vault.pendingRewards(account);
                let (staked, rewards, balance) = futures::join!(
                    staked_builder.call().into_future(),
                    rewards_builder.call().into_future(),
                    token.balance_of(account).into_future(),
                );

                (
                    Some(
                        staked
                            .map_err(|e| RpcError::contract_call_failed("stakedBalanceOf", e))?,
                    ),
                    Some(
                        rewards.map_err(|e| RpcError::contract_call_failed("pendingRewards", e))?,
                    ),
                    Some(balance.map_err(|e| RpcError::contract_call_failed("balanceOf", e))?),
                )
            }
            None => (None, None, None),
        };

        Ok(VaultFigures {
            price: price.map_err(|e| RpcError::contract_call_failed("price", e))?,
            fee_rate: fee_rate.map_err(|e| RpcError::contract_call_failed("feeRate", e))?,
            total_staked: total_staked
                .map_err(|e| RpcError::contract_call_failed("totalStaked", e))?,
            staked_balance,
            pending_rewards,
            wallet_balance,
        })
    }
}

/// Write operations
///
/// These submit node-signed transactions from the given sender and return the
/// pending transaction hash; confirmation tracking is the caller's business.
impl ContractClient {
    /// Stakes an amount of the vault's coin for `sender`
    pub async fn stake(
        &self,
        id: VaultId,
        amount: U256,
        sender: Address,
    ) -> Result<TxHash, RpcError> {
        let (provider, _) = self.deployment(id.chain_id)?;
        let vault = IHodlVault::new(id.vault_address, provider);

        let pending = vault
            .stake(amount)
            .from(sender)
            .send()
            .await
            .map_err(|e| RpcError::contract_call_failed("stake", e))?;

        info!(vault = %id, %sender, "Submitted stake transaction");
        Ok(*pending.tx_hash())
    }

    /// Unstakes an amount of the vault's coin for `sender`
    pub async fn unstake(
        &self,
        id: VaultId,
        amount: U256,
        sender: Address,
    ) -> Result<TxHash, RpcError> {
        let (provider, _) = self.deployment(id.chain_id)?;
        let vault = IHodlVault::new(id.vault_address, provider);

        let pending = vault
            .unstake(amount)
            .from(sender)
            .send()
            .await
            .map_err(|e| RpcError::contract_call_failed("unstake", e))?;

        info!(vault = %id, %sender, "Submitted unstake transaction");
        Ok(*pending.tx_hash())
    }

    /// Claims `sender`'s accumulated rewards from a vault
    pub async fn claim_rewards(&self, id: VaultId, sender: Address) -> Result<TxHash, RpcError> {
        let (provider, _) = self.deployment(id.chain_id)?;
        let vault = IHodlVault::new(id.vault_address, provider);

        let pending = vault
            .claimRewards()
            .from(sender)
            .send()
            .await
            .map_err(|e| RpcError::contract_call_failed("claimRewards", e))?;

        info!(vault = %id, %sender, "Submitted claim transaction");
        Ok(*pending.tx_hash())
    }

    /// Marks or unmarks a vault as favorite for `sender`
    ///
    /// The on-chain registry is the source of truth for favorites; after this
    /// transaction confirms, the caller should invalidate the local favorites
    /// record (see [`Syncer::clear_cache`](crate::Syncer::clear_cache)).
    pub async fn set_favorite(
        &self,
        id: VaultId,
        flagged: bool,
        sender: Address,
    ) -> Result<TxHash, RpcError> {
        let (provider, factory_address) = self.deployment(id.chain_id)?;
        let factory = IVaultFactory::new(factory_address, provider);

        let pending = factory
            .setFavorite(id.vault_address, flagged)
            .from(sender)
            .send()
            .await
            .map_err(|e| RpcError::contract_call_failed("setFavorite", e))?;

        info!(vault = %id, %sender, flagged, "Submitted favorite transaction");
        Ok(*pending.tx_hash())
    }
}
