// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-through fetch orchestration
//!
//! For each data domain (chain vault listing, user-owned vaults, user
//! favorites, single-vault detail) the [`Syncer`] runs the same state
//! machine per request:
//!
//! 1. Unless the caller forces a refresh, check the store for the key.
//! 2. A record that exists and is within TTL is a **cache hit**: return it
//!    immediately, no remote call, source marked `cache`.
//! 3. No record, an expired record, or a forced refresh is a **cache miss**:
//!    invoke the blockchain read client.
//! 4. On success, write the fresh value back (write failures are logged and
//!    never fail the operation) and return it with source `blockchain`.
//! 5. On failure, surface the error; any existing cached value is left
//!    untouched; a failed passive refresh never destroys stale-but-present
//!    data.
//!
//! The explicit `sync_*` operations clear the cache entry *first*, then
//! refetch, so a failed fetch after a sync leaves the entry empty rather
//! than stale.
//!
//! Storage failures on this path degrade to network-only operation; they
//! never crash a load. Concurrent identical requests are NOT coalesced;
//! each caller independently checks the cache and may independently hit the
//! chain.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vaultsync::{ContractClient, DiskStore, Syncer};
//!
//! let store = Arc::new(DiskStore::open("vaultsync.json").await?);
//! let reader = Arc::new(ContractClient::new(deployments)?);
//! let syncer = Syncer::new(store, reader);
//!
//! let vaults = syncer.load_chain_vaults(8453, false).await?;
//! println!("{} vaults via {}", vaults.data.len(), vaults.source);
//! ```

use alloy_primitives::Address;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::SyncError;
use crate::freshness::FreshnessPolicy;
use crate::reader::{VaultFigures, VaultReader};
use crate::store::{keys, Partition, StoreStats, VaultStore};
use crate::types::{PaginationState, TimestampMillis, VaultDetail, VaultId, VaultSummary};

/// Where a returned value came from
///
/// Surfaced to the view layer so cache-served data can be visually marked
/// distinct from freshly fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Served from the local cache
    Cache,
    /// Fetched from the chain during this request
    Blockchain,
}

impl DataSource {
    /// Stable name used in log output and view payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Cache => "cache",
            DataSource::Blockchain => "blockchain",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched value together with its provenance
///
/// `written_at` is the cache record's write time for hits and the fetch time
/// for fresh data; the view renders it next to the "Cached"/"Fresh"
/// indicator so users can judge staleness.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The value itself
    pub data: T,
    /// Whether it came from cache or chain
    pub source: DataSource,
    /// When the value was written (cache) or fetched (chain)
    pub written_at: TimestampMillis,
}

impl<T> Fetched<T> {
    fn from_cache(data: T, written_at: TimestampMillis) -> Self {
        Self {
            data,
            source: DataSource::Cache,
            written_at,
        }
    }

    fn from_chain(data: T, written_at: TimestampMillis) -> Self {
        Self {
            data,
            source: DataSource::Blockchain,
            written_at,
        }
    }

    /// True if this value was served from the local cache
    pub fn is_cached(&self) -> bool {
        self.source == DataSource::Cache
    }
}

/// Read-through fetch orchestrator
///
/// Owns nothing global: the store and reader are injected at construction by
/// the application's composition root and shared via `Arc`. Cloning a
/// `Syncer` clones the handles, not the state.
#[derive(Clone)]
pub struct Syncer {
    store: Arc<dyn VaultStore>,
    reader: Arc<dyn VaultReader>,
    policy: FreshnessPolicy,
}

impl Syncer {
    /// Creates a syncer with the default 15-minute freshness policy
    pub fn new(store: Arc<dyn VaultStore>, reader: Arc<dyn VaultReader>) -> Self {
        Self::with_policy(store, reader, FreshnessPolicy::default())
    }

    /// Creates a syncer with a custom freshness policy
    pub fn with_policy(
        store: Arc<dyn VaultStore>,
        reader: Arc<dyn VaultReader>,
        policy: FreshnessPolicy,
    ) -> Self {
        Self {
            store,
            reader,
            policy,
        }
    }

    /// The freshness policy in effect
    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    /// Current counters of the underlying store
    pub async fn store_stats(&self) -> StoreStats {
        self.store.stats().await
    }

    // ---- cache plumbing -------------------------------------------------

    /// Returns the fresh cached value under `(partition, key)`, if any
    ///
    /// Expired records, undecodable records and storage failures all count
    /// as misses; only the storage failure is worth a warning.
    async fn cached<T: DeserializeOwned>(
        &self,
        partition: Partition,
        key: &str,
    ) -> Option<(T, TimestampMillis)> {
        let record = match self.store.get(partition, key).await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(%partition, key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        if self.policy.is_expired(partition, record.written_at) {
            debug!(%partition, key, "Cache record expired");
            return None;
        }

        match serde_json::from_value(record.value) {
            Ok(value) => Some((value, record.written_at)),
            Err(e) => {
                warn!(%partition, key, error = %e, "Undecodable cache record, treating as miss");
                None
            }
        }
    }

    /// Writes a freshly fetched value back to the store
    ///
    /// Failures are logged and swallowed: the fetched data still reaches the
    /// caller even when the cache cannot hold it.
    async fn write_back<T: Serialize>(
        &self,
        partition: Partition,
        key: &str,
        value: &T,
    ) -> TimestampMillis {
        let written_at = TimestampMillis::now();
        match serde_json::to_value(value) {
            Ok(json) => {
                if let Err(e) = self.store.put(partition, key, json, written_at).await {
                    warn!(%partition, key, error = %e, "Cache write failed, returning data uncached");
                }
            }
            Err(e) => {
                warn!(%partition, key, error = %e, "Could not serialize value for cache");
            }
        }
        written_at
    }

    /// Deletes a cache entry ahead of a sync refetch
    ///
    /// Failure is not fatal: with storage gone the entry cannot be stale
    /// anyway.
    async fn clear_entry(&self, partition: Partition, key: &str) {
        if let Err(e) = self.store.delete(partition, key).await {
            warn!(%partition, key, error = %e, "Cache clear failed before sync");
        }
    }

    // ---- chain vault listings -------------------------------------------

    /// Loads the vault listing for a chain, cache-first
    pub async fn load_chain_vaults(
        &self,
        chain_id: u64,
        force_refresh: bool,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_chain(chain_id)?;
        let key = keys::chain_vaults(chain_id);

        if !force_refresh {
            if let Some((data, written_at)) = self.cached(Partition::ChainVaults, &key).await {
                return Ok(Fetched::from_cache(data, written_at));
            }
        }
        self.refetch_chain_vaults(chain_id, &key).await
    }

    /// Explicit sync: clears the cached listing, then refetches
    pub async fn sync_chain_vaults(
        &self,
        chain_id: u64,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_chain(chain_id)?;
        let key = keys::chain_vaults(chain_id);
        self.clear_entry(Partition::ChainVaults, &key).await;
        self.refetch_chain_vaults(chain_id, &key).await
    }

    async fn refetch_chain_vaults(
        &self,
        chain_id: u64,
        key: &str,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        let data = self
            .reader
            .chain_vaults(chain_id)
            .await
            .map_err(SyncError::remote)?;
        let written_at = self.write_back(Partition::ChainVaults, key, &data).await;
        Ok(Fetched::from_chain(data, written_at))
    }

    // ---- user vault listings --------------------------------------------

    /// Loads the vaults a wallet created, cache-first
    pub async fn load_user_vaults(
        &self,
        owner: Address,
        force_refresh: bool,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_wallet(owner)?;
        let key = keys::wallet(owner);

        if !force_refresh {
            if let Some((data, written_at)) = self.cached(Partition::UserVaults, &key).await {
                return Ok(Fetched::from_cache(data, written_at));
            }
        }
        self.refetch_user_vaults(owner, &key).await
    }

    /// Explicit sync of a wallet's vault listing
    pub async fn sync_user_vaults(
        &self,
        owner: Address,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_wallet(owner)?;
        let key = keys::wallet(owner);
        self.clear_entry(Partition::UserVaults, &key).await;
        self.refetch_user_vaults(owner, &key).await
    }

    async fn refetch_user_vaults(
        &self,
        owner: Address,
        key: &str,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        let data = self
            .reader
            .user_vaults(owner)
            .await
            .map_err(SyncError::remote)?;
        let written_at = self.write_back(Partition::UserVaults, key, &data).await;
        Ok(Fetched::from_chain(data, written_at))
    }

    // ---- favorites ------------------------------------------------------

    /// Loads the vaults a wallet marked as favorite, cache-first
    ///
    /// The chain is the source of truth; after an on-chain favorite change
    /// confirms, invalidate with
    /// [`clear_cache`](Self::clear_cache)`(Partition::FavoriteVaults, ...)`
    /// or call [`sync_favorites`](Self::sync_favorites).
    pub async fn load_favorites(
        &self,
        owner: Address,
        force_refresh: bool,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_wallet(owner)?;
        let key = keys::wallet(owner);

        if !force_refresh {
            if let Some((data, written_at)) = self.cached(Partition::FavoriteVaults, &key).await {
                return Ok(Fetched::from_cache(data, written_at));
            }
        }
        self.refetch_favorites(owner, &key).await
    }

    /// Explicit sync of a wallet's favorites
    pub async fn sync_favorites(
        &self,
        owner: Address,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        require_wallet(owner)?;
        let key = keys::wallet(owner);
        self.clear_entry(Partition::FavoriteVaults, &key).await;
        self.refetch_favorites(owner, &key).await
    }

    async fn refetch_favorites(
        &self,
        owner: Address,
        key: &str,
    ) -> Result<Fetched<Vec<VaultSummary>>, SyncError> {
        let data = self
            .reader
            .favorite_vaults(owner)
            .await
            .map_err(SyncError::remote)?;
        let written_at = self.write_back(Partition::FavoriteVaults, key, &data).await;
        Ok(Fetched::from_chain(data, written_at))
    }

    // ---- per-vault detail -----------------------------------------------

    /// Loads the metadata record for one vault, cache-first
    pub async fn load_vault_detail(
        &self,
        id: VaultId,
        force_refresh: bool,
    ) -> Result<Fetched<VaultDetail>, SyncError> {
        require_vault(id)?;
        let key = keys::vault_detail(id);

        if !force_refresh {
            if let Some((data, written_at)) = self.cached(Partition::VaultDetails, &key).await {
                return Ok(Fetched::from_cache(data, written_at));
            }
        }
        self.refetch_vault_detail(id, &key).await
    }

    /// Explicit sync of one vault's metadata record
    pub async fn sync_vault_detail(&self, id: VaultId) -> Result<Fetched<VaultDetail>, SyncError> {
        require_vault(id)?;
        let key = keys::vault_detail(id);
        self.clear_entry(Partition::VaultDetails, &key).await;
        self.refetch_vault_detail(id, &key).await
    }

    async fn refetch_vault_detail(
        &self,
        id: VaultId,
        key: &str,
    ) -> Result<Fetched<VaultDetail>, SyncError> {
        let data = self
            .reader
            .vault_detail(id)
            .await
            .map_err(SyncError::remote)?;
        let written_at = self.write_back(Partition::VaultDetails, key, &data).await;
        Ok(Fetched::from_chain(data, written_at))
    }

    // ---- live figures ---------------------------------------------------

    /// Reads live figures for a vault
    ///
    /// Pass-through: figures change block to block and are never cached, so
    /// the source is always `blockchain`.
    pub async fn vault_figures(
        &self,
        id: VaultId,
        account: Option<Address>,
    ) -> Result<Fetched<VaultFigures>, SyncError> {
        require_vault(id)?;
        let data = self
            .reader
            .vault_figures(id, account)
            .await
            .map_err(SyncError::remote)?;
        Ok(Fetched::from_chain(data, TimestampMillis::now()))
    }

    // ---- pagination state -----------------------------------------------

    /// Returns the saved pagination state for a view, if any
    ///
    /// Pagination records never expire. Storage failures degrade to "no
    /// saved state" rather than erroring, since losing a saved page number is not
    /// worth a failed render.
    pub async fn pagination_state(
        &self,
        view_id: &str,
    ) -> Result<Option<PaginationState>, SyncError> {
        require_view(view_id)?;
        let key = keys::view(view_id);
        Ok(self
            .cached::<PaginationState>(Partition::Pagination, &key)
            .await
            .map(|(state, _)| state))
    }

    /// Saves pagination state for a view
    ///
    /// Unlike read-through write-backs, this is a store-directed operation:
    /// a storage failure is surfaced to the caller.
    pub async fn set_pagination_state(
        &self,
        view_id: &str,
        state: &PaginationState,
    ) -> Result<(), SyncError> {
        require_view(view_id)?;
        let key = keys::view(view_id);
        let json = serde_json::to_value(state)
            .map_err(crate::errors::StoreError::Serialization)?;
        self.store
            .put(Partition::Pagination, &key, json, TimestampMillis::now())
            .await?;
        Ok(())
    }

    // ---- manual cache management ----------------------------------------

    /// Removes a single cache entry
    ///
    /// This is the manual cache-clear action; storage failures are surfaced.
    pub async fn clear_cache(&self, partition: Partition, key: &str) -> Result<(), SyncError> {
        self.store.delete(partition, key).await?;
        debug!(%partition, key, "Cleared cache entry");
        Ok(())
    }

    /// Removes every entry of a partition
    pub async fn clear_partition(&self, partition: Partition) -> Result<(), SyncError> {
        self.store.clear_partition(partition).await?;
        debug!(%partition, "Cleared cache partition");
        Ok(())
    }
}

fn require_chain(chain_id: u64) -> Result<(), SyncError> {
    if chain_id == 0 {
        return Err(SyncError::invalid_request("chain id is required"));
    }
    Ok(())
}

fn require_wallet(owner: Address) -> Result<(), SyncError> {
    if owner == Address::ZERO {
        return Err(SyncError::invalid_request("wallet address is required"));
    }
    Ok(())
}

fn require_vault(id: VaultId) -> Result<(), SyncError> {
    require_chain(id.chain_id)?;
    if id.vault_address == Address::ZERO {
        return Err(SyncError::invalid_request("vault address is required"));
    }
    Ok(())
}

fn require_view(view_id: &str) -> Result<(), SyncError> {
    if view_id.trim().is_empty() {
        return Err(SyncError::invalid_request("view identifier is required"));
    }
    Ok(())
}
