// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Composition root for the vault data layer
//!
//! Builds the store, the contract client and the syncer from a
//! [`VaultsyncConfig`]. The store and reader are constructed here, once, and
//! injected into the [`Syncer`]; there is no module-level singleton to
//! reach for.
//!
//! If the durable store cannot be opened (storage disabled, unwritable
//! profile, corrupt file), the data layer degrades to network-only mode for
//! the session instead of failing to start: an [`UnavailableStore`] takes
//! the store's place and every load is served from the chain.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::VaultsyncConfig;
use crate::errors::VaultsyncError;
use crate::freshness::FreshnessPolicy;
use crate::reader::ContractClient;
use crate::store::{DiskStore, MemoryStore, UnavailableStore, VaultStore};
use crate::sync::Syncer;

/// Assembles a ready-to-use [`Syncer`] from configuration
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::{bootstrap, Deployment, VaultsyncConfig};
///
/// let config = VaultsyncConfig::builder()
///     .cache_path("~/.cache/vaultsync/store.json")
///     .deployment(Deployment::new(8453, factory, "https://mainnet.base.org"))
///     .build();
///
/// let syncer = bootstrap::initialize(config).await?;
/// ```
///
/// # Errors
///
/// Returns an error if a deployment's RPC endpoint URL is invalid. A failed
/// store open is NOT an error, it degrades to network-only operation.
pub async fn initialize(config: VaultsyncConfig) -> Result<Syncer, VaultsyncError> {
    let store: Arc<dyn VaultStore> = match &config.cache_path {
        Some(path) => match DiskStore::open(path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Durable store unavailable, continuing network-only"
                );
                Arc::new(UnavailableStore)
            }
        },
        None => Arc::new(MemoryStore::new()),
    };

    let reader = Arc::new(ContractClient::new(config.deployments)?);

    info!(
        store = store.name(),
        chains = reader.chain_ids().len(),
        ttl_secs = config.ttl.as_secs(),
        "Vault data layer ready"
    );

    Ok(Syncer::with_policy(
        store,
        reader,
        FreshnessPolicy::new(config.ttl),
    ))
}
