// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-chain HTTP providers
//!
//! The DApp reads several chains from one session, selected at runtime by
//! chain id, so providers are type-erased over `AnyNetwork` and pooled per
//! chain. A chain with no pooled provider is simply unreachable; the
//! orchestrator surfaces that as `RemoteUnavailable` rather than an error in
//! provider construction.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vaultsync::provider::{ChainEndpoint, ProviderPool};
//!
//! let pool = ProviderPool::from_endpoints(
//!     vec![
//!         ChainEndpoint::base("https://mainnet.base.org"),
//!         ChainEndpoint::mainnet("https://eth.llamarpc.com"),
//!     ],
//!     Some(10),
//! )?;
//!
//! let provider = pool.get_by_id(8453).expect("Base is configured");
//! ```

mod config;
mod factory;
mod pool;

use alloy_network::AnyNetwork;

pub use config::ProviderConfig;
pub use factory::create_http_provider;
pub use pool::{ChainEndpoint, PooledProvider, ProviderPool, ProviderPoolBuilder};

/// Type alias for an HTTP provider using AnyNetwork
///
/// This provider can interact with any EVM chain but loses network-specific
/// type information. The vault data layer only performs plain contract calls,
/// so the flexibility costs nothing here.
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;
