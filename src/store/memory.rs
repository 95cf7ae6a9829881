// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Partition, StoreStats, StoredRecord, VaultStore};
use crate::errors::StoreError;
use crate::types::TimestampMillis;

/// Internal state for the memory store
#[derive(Debug, Default)]
struct MemoryStoreState {
    /// Partition → records
    partitions: HashMap<Partition, HashMap<String, StoredRecord>>,
    /// Store activity counters
    stats: StoreStats,
}

impl MemoryStoreState {
    fn total_records(&self) -> usize {
        self.partitions.values().map(HashMap::len).sum()
    }
}

/// Non-durable store keeping records in a partitioned map
///
/// Used in tests and as a session-only store when durable storage is not
/// wanted. Same contract as [`DiskStore`](super::DiskStore) minus
/// persistence: records are gone when the process ends.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryStore {
    /// Creates an empty memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VaultStore for MemoryStore {
    async fn get(
        &self,
        partition: Partition,
        key: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let mut state = self.state.lock().await;

        let record = state
            .partitions
            .get(&partition)
            .and_then(|records| records.get(key))
            .cloned();

        match record {
            Some(record) => {
                state.stats.hits += 1;
                debug!(%partition, key, "Store hit (memory)");
                Ok(Some(record))
            }
            None => {
                state.stats.misses += 1;
                debug!(%partition, key, "Store miss (memory)");
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        partition: Partition,
        key: &str,
        value: serde_json::Value,
        written_at: TimestampMillis,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        state
            .partitions
            .entry(partition)
            .or_default()
            .insert(key.to_string(), StoredRecord::new(value, written_at));

        state.stats.writes += 1;
        state.stats.records = state.total_records();
        Ok(())
    }

    async fn delete(&self, partition: Partition, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        let removed = state
            .partitions
            .get_mut(&partition)
            .and_then(|records| records.remove(key))
            .is_some();

        if removed {
            state.stats.deletes += 1;
            state.stats.records = state.total_records();
        }
        Ok(())
    }

    async fn clear_partition(&self, partition: Partition) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        if let Some(records) = state.partitions.get_mut(&partition) {
            let removed = records.len();
            records.clear();
            state.stats.deletes += removed as u64;
            state.stats.records = state.total_records();
        }
        Ok(())
    }

    async fn stats(&self) -> StoreStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryStore"
    }
}
