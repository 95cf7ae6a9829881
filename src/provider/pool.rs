// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain provider pooling
//!
//! The pool maintains one provider per configured chain so every vault read
//! for that chain reuses the same connection. Chains are keyed by
//! [`Chain`], which accepts arbitrary ids; the DApp's callers hand over raw
//! chain ids like `8453`, not compile-time network types.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vaultsync::provider::{ChainEndpoint, ProviderPool};
//!
//! let pool = ProviderPool::from_endpoints(
//!     vec![
//!         ChainEndpoint::base("https://mainnet.base.org"),
//!         ChainEndpoint::mainnet("https://eth.llamarpc.com").with_rate_limit(5),
//!     ],
//!     Some(10),
//! )?;
//!
//! if let Some(provider) = pool.get_by_id(8453) {
//!     let block = provider.get_block_number().await?;
//! }
//! ```

use alloy_chains::{Chain, NamedChain};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::errors::RpcError;

use super::config::ProviderConfig;
use super::factory::create_http_provider;
use super::AnyHttpProvider;

/// Type alias for a pooled provider
pub type PooledProvider = Arc<AnyHttpProvider>;

/// A thread-safe pool of providers indexed by chain
///
/// Reads take a shared lock; adding a chain takes an exclusive one. Safe to
/// share across tasks via `Arc<ProviderPool>`.
#[derive(Debug, Default)]
pub struct ProviderPool {
    /// Map of chain to provider
    providers: RwLock<HashMap<Chain, PooledProvider>>,
    /// Default rate limit for new providers (requests per second)
    default_rate_limit: Option<u32>,
}

impl ProviderPool {
    /// Create a new empty provider pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with a default rate limit for new providers
    #[must_use]
    pub fn with_defaults(rate_limit: Option<u32>) -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            default_rate_limit: rate_limit,
        }
    }

    /// Create a pool from a list of chain endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint URL is invalid
    pub fn from_endpoints(
        endpoints: Vec<ChainEndpoint>,
        rate_limit: Option<u32>,
    ) -> Result<Self, RpcError> {
        let pool = Self::with_defaults(rate_limit);
        for endpoint in endpoints {
            pool.add(
                endpoint.chain,
                &endpoint.url,
                endpoint.rate_limit.or(rate_limit),
            )?;
        }
        Ok(pool)
    }

    /// Add a provider for a specific chain, replacing any existing one
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn add(&self, chain: Chain, url: &str, rate_limit: Option<u32>) -> Result<(), RpcError> {
        let config =
            ProviderConfig::new(url).with_rate_limit_opt(rate_limit.or(self.default_rate_limit));
        let provider = create_http_provider(config)?;

        let mut providers = self.providers.write().map_err(|_| {
            RpcError::ProviderConnectionFailed("provider pool lock poisoned".to_string())
        })?;

        if providers.contains_key(&chain) {
            debug!(%chain, "Replacing existing provider");
        } else {
            info!(%chain, url, "Added provider to pool");
        }

        providers.insert(chain, Arc::new(provider));
        Ok(())
    }

    /// Get a provider for a specific chain
    ///
    /// Returns `None` if no provider is configured for the chain.
    #[must_use]
    pub fn get(&self, chain: Chain) -> Option<PooledProvider> {
        self.providers
            .read()
            .ok()
            .and_then(|providers| providers.get(&chain).cloned())
    }

    /// Get a provider by raw chain id
    #[must_use]
    pub fn get_by_id(&self, chain_id: u64) -> Option<PooledProvider> {
        self.get(Chain::from_id(chain_id))
    }

    /// Check if a provider exists for a chain
    #[must_use]
    pub fn contains(&self, chain: Chain) -> bool {
        self.providers
            .read()
            .ok()
            .is_some_and(|providers| providers.contains_key(&chain))
    }

    /// Get the number of providers in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers
            .read()
            .map(|providers| providers.len())
            .unwrap_or(0)
    }

    /// Check if the pool is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all configured chains
    #[must_use]
    pub fn chains(&self) -> Vec<Chain> {
        self.providers
            .read()
            .map(|providers| providers.keys().copied().collect())
            .unwrap_or_default()
    }
}

/// Builder for creating provider pools with common configurations
#[derive(Default)]
pub struct ProviderPoolBuilder {
    endpoints: Vec<ChainEndpoint>,
    default_rate_limit: Option<u32>,
}

impl ProviderPoolBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chain endpoint to the pool
    #[must_use]
    pub fn add_chain(mut self, chain: Chain, url: &str) -> Self {
        self.endpoints.push(ChainEndpoint::new(chain, url));
        self
    }

    /// Set the default rate limit for all providers
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.default_rate_limit = Some(requests_per_second);
        self
    }

    /// Build the provider pool
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint URL is invalid
    pub fn build(self) -> Result<ProviderPool, RpcError> {
        ProviderPool::from_endpoints(self.endpoints, self.default_rate_limit)
    }
}

/// Configuration for a chain endpoint
#[derive(Debug, Clone)]
pub struct ChainEndpoint {
    /// The chain this endpoint serves
    pub chain: Chain,
    /// The RPC endpoint URL
    pub url: String,
    /// Optional rate limit override for this specific chain
    pub rate_limit: Option<u32>,
}

impl ChainEndpoint {
    /// Create a new chain endpoint
    #[must_use]
    pub fn new(chain: Chain, url: impl Into<String>) -> Self {
        Self {
            chain,
            url: url.into(),
            rate_limit: None,
        }
    }

    /// Set a rate limit for this endpoint
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Create an Ethereum mainnet endpoint
    #[must_use]
    pub fn mainnet(url: impl Into<String>) -> Self {
        Self::new(Chain::from_named(NamedChain::Mainnet), url)
    }

    /// Create a Base mainnet endpoint
    #[must_use]
    pub fn base(url: impl Into<String>) -> Self {
        Self::new(Chain::from_named(NamedChain::Base), url)
    }

    /// Create an Optimism mainnet endpoint
    #[must_use]
    pub fn optimism(url: impl Into<String>) -> Self {
        Self::new(Chain::from_named(NamedChain::Optimism), url)
    }

    /// Create an Arbitrum One endpoint
    #[must_use]
    pub fn arbitrum(url: impl Into<String>) -> Self {
        Self::new(Chain::from_named(NamedChain::Arbitrum), url)
    }
}
