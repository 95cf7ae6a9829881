// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the vault data layer
//!
//! Collects everything the composition root needs to assemble a
//! [`Syncer`](crate::Syncer): where the durable cache lives, how long
//! records stay fresh, and which chains carry a protocol deployment.
//!
//! # Example
//!
//! ```rust
//! use vaultsync::{VaultsyncConfig, Deployment};
//! use alloy_primitives::address;
//! use std::time::Duration;
//!
//! let config = VaultsyncConfig::builder()
//!     .cache_path("vaultsync.json")
//!     .ttl(Duration::from_secs(900))
//!     .deployment(Deployment::new(
//!         8453,
//!         address!("1234567890abcdef1234567890abcdef12345678"),
//!         "https://mainnet.base.org",
//!     ))
//!     .build();
//!
//! assert_eq!(config.deployments.len(), 1);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::freshness::DEFAULT_TTL;
use crate::reader::Deployment;

/// Configuration for assembling the vault data layer
#[derive(Debug, Clone)]
pub struct VaultsyncConfig {
    /// Path of the durable cache file
    ///
    /// `None` runs with a session-only in-memory store.
    pub cache_path: Option<PathBuf>,

    /// Validity window for cached records
    /// Default: 15 minutes
    pub ttl: Duration,

    /// Per-chain protocol deployments (RPC endpoint + factory address)
    pub deployments: Vec<Deployment>,
}

impl VaultsyncConfig {
    /// Starts a builder with defaults
    pub fn builder() -> VaultsyncConfigBuilder {
        VaultsyncConfigBuilder::default()
    }
}

impl Default for VaultsyncConfig {
    fn default() -> Self {
        Self {
            cache_path: None,
            ttl: DEFAULT_TTL,
            deployments: Vec::new(),
        }
    }
}

/// Builder for [`VaultsyncConfig`]
///
/// # Example
///
/// ```rust
/// use vaultsync::VaultsyncConfig;
/// use std::time::Duration;
///
/// let config = VaultsyncConfig::builder()
///     .ttl(Duration::from_secs(300))
///     .build();
///
/// assert_eq!(config.ttl, Duration::from_secs(300));
/// ```
#[derive(Debug, Default)]
pub struct VaultsyncConfigBuilder {
    config: VaultsyncConfig,
}

impl VaultsyncConfigBuilder {
    /// Sets the durable cache file path
    #[must_use]
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cache_path = Some(path.into());
        self
    }

    /// Overrides the record TTL
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    /// Adds a chain deployment
    #[must_use]
    pub fn deployment(mut self, deployment: Deployment) -> Self {
        self.config.deployments.push(deployment);
        self
    }

    /// Builds the final configuration
    pub fn build(self) -> VaultsyncConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[test]
    fn defaults() {
        let config = VaultsyncConfig::default();
        assert!(config.cache_path.is_none());
        assert_eq!(config.ttl, DEFAULT_TTL);
        assert!(config.deployments.is_empty());
    }

    #[test]
    fn builder_collects_everything() {
        let config = VaultsyncConfig::builder()
            .cache_path("/tmp/vaultsync.json")
            .ttl(Duration::from_secs(60))
            .deployment(Deployment::new(8453, Address::ZERO, "https://mainnet.base.org"))
            .deployment(Deployment::new(1, Address::ZERO, "https://eth.llamarpc.com"))
            .build();

        assert_eq!(
            config.cache_path.as_deref(),
            Some(std::path::Path::new("/tmp/vaultsync.json"))
        );
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.deployments.len(), 2);
    }
}
