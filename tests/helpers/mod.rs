// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for vaultsync integration tests
//!
//! Provides a scripted [`VaultReader`] so orchestrator behavior can be tested
//! without a blockchain connection, plus record constructors and backdating
//! utilities.

use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use vaultsync::reader::{VaultFigures, VaultReader};
use vaultsync::{RpcError, TimestampMillis, VaultDetail, VaultId, VaultSummary};

/// Scripted VaultReader for testing orchestrator logic
///
/// Returns preconfigured listings/details, counts every remote call, and can
/// be flipped into a failing state mid-test to simulate chain outages.
///
/// # Example
///
/// ```rust,ignore
/// let reader = Arc::new(MockReader::new().with_summaries(vec![base_vault_summary()]));
/// let syncer = Syncer::new(store, reader.clone());
///
/// syncer.load_chain_vaults(8453, false).await?;
/// assert_eq!(reader.remote_calls(), 1);
/// ```
#[derive(Default)]
#[allow(dead_code)]
pub struct MockReader {
    summaries: Vec<VaultSummary>,
    detail: Option<VaultDetail>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockReader {
    /// Creates a reader with no scripted data
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summaries returned by every listing read
    pub fn with_summaries(mut self, summaries: Vec<VaultSummary>) -> Self {
        self.summaries = summaries;
        self
    }

    /// Sets the detail returned by `vault_detail`
    pub fn with_detail(mut self, detail: VaultDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Flips the reader into (or out of) a simulated outage
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of remote calls made so far
    pub fn remote_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) -> Result<(), RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(RpcError::contract_call_failed(
                "mock",
                std::io::Error::other("simulated outage"),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VaultReader for MockReader {
    async fn chain_vaults(&self, chain_id: u64) -> Result<Vec<VaultSummary>, RpcError> {
        self.tick()?;
        Ok(self
            .summaries
            .iter()
            .filter(|s| s.chain_id == chain_id)
            .cloned()
            .collect())
    }

    async fn user_vaults(&self, _owner: Address) -> Result<Vec<VaultSummary>, RpcError> {
        self.tick()?;
        Ok(self.summaries.clone())
    }

    async fn favorite_vaults(&self, _owner: Address) -> Result<Vec<VaultSummary>, RpcError> {
        self.tick()?;
        Ok(self.summaries.clone())
    }

    async fn vault_detail(&self, _id: VaultId) -> Result<VaultDetail, RpcError> {
        self.tick()?;
        self.detail
            .clone()
            .ok_or_else(|| RpcError::invalid_response("vault_detail", "no scripted detail"))
    }

    async fn vault_figures(
        &self,
        _id: VaultId,
        account: Option<Address>,
    ) -> Result<VaultFigures, RpcError> {
        self.tick()?;
        Ok(VaultFigures {
            price: U256::from(42u64),
            fee_rate: U256::from(250u64),
            total_staked: U256::from(1_000_000u64),
            staked_balance: account.map(|_| U256::from(10u64)),
            pending_rewards: account.map(|_| U256::from(1u64)),
            wallet_balance: account.map(|_| U256::from(500u64)),
        })
    }
}

/// The chain listing row from the Base (8453) scenario
#[allow(dead_code)]
pub fn base_vault_summary() -> VaultSummary {
    VaultSummary {
        chain_id: 8453,
        vault_address: address!("00000000000000000000000000000000000000aa"),
        coin_name: "Test".to_string(),
        coin_symbol: "TST".to_string(),
        coin_address: address!("00000000000000000000000000000000000000bb"),
    }
}

/// A distinguishable summary for multi-record tests
#[allow(dead_code)]
pub fn summary(chain_id: u64, n: u8) -> VaultSummary {
    VaultSummary {
        chain_id,
        vault_address: Address::repeat_byte(n),
        coin_name: format!("Coin {n}"),
        coin_symbol: format!("C{n}"),
        coin_address: Address::repeat_byte(n.wrapping_add(1)),
    }
}

/// A complete vault detail record
#[allow(dead_code)]
pub fn sample_detail() -> VaultDetail {
    VaultDetail {
        coin_address: address!("00000000000000000000000000000000000000bb"),
        coin_name: "Test".to_string(),
        coin_symbol: "TST".to_string(),
        hodl_symbol: "hTST".to_string(),
        decimals: 18,
        creator: address!("00000000000000000000000000000000000000cc"),
    }
}

/// A wallet address that is not zero
#[allow(dead_code)]
pub fn wallet() -> Address {
    address!("d8da6bf26964af9d7eed9e03e53415d37aa96045")
}

/// A write timestamp `age` in the past
#[allow(dead_code)]
pub fn backdated(age: Duration) -> TimestampMillis {
    TimestampMillis::from_millis(TimestampMillis::now().as_millis() - age.as_millis())
}

/// Installs a test tracing subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call wins.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
