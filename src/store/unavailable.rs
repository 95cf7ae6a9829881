// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Store stand-in for hosts where local storage is unavailable

use async_trait::async_trait;

use super::{Partition, StoreStats, StoredRecord, VaultStore};
use crate::errors::StoreError;
use crate::types::TimestampMillis;

/// A store whose every operation fails with [`StoreError::Unavailable`]
///
/// Used when the durable store could not be initialized (storage disabled or
/// unsupported by the host). The orchestrator treats the failures as
/// permanent cache misses and serves everything from the network, so the
/// application keeps working, just without a cache.
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::{Partition, UnavailableStore, VaultStore};
///
/// let store = UnavailableStore;
/// assert!(store.get(Partition::ChainVaults, "8453").await.is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl VaultStore for UnavailableStore {
    async fn get(
        &self,
        _partition: Partition,
        _key: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn put(
        &self,
        _partition: Partition,
        _key: &str,
        _value: serde_json::Value,
        _written_at: TimestampMillis,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn delete(&self, _partition: Partition, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn clear_partition(&self, _partition: Partition) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn stats(&self) -> StoreStats {
        StoreStats::default()
    }

    fn name(&self) -> &'static str {
        "UnavailableStore"
    }
}
