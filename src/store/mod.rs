// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Persistent cache store backends
//!
//! This module provides the partitioned key-value store that vault data is
//! cached in, with several backends:
//!
//! - [`DiskStore`]: durable JSON-file store with file locking and schema
//!   versioning (default)
//! - [`MemoryStore`]: in-memory store for tests and session-only operation
//! - [`UnavailableStore`]: every operation fails; models a host with local
//!   storage disabled
//!
//! The store does NOT enforce the cache TTL: records carry their write
//! timestamp and the orchestrator applies the
//! [`FreshnessPolicy`](crate::FreshnessPolicy) at read time.
//!
//! # Examples
//!
//! ```rust,ignore
//! use vaultsync::store::{keys, DiskStore, Partition, VaultStore};
//! use vaultsync::TimestampMillis;
//!
//! let store = DiskStore::open("vaultsync.json").await?;
//! store.put(
//!     Partition::ChainVaults,
//!     &keys::chain_vaults(8453),
//!     serde_json::to_value(&summaries)?,
//!     TimestampMillis::now(),
//! ).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StoreError;
use crate::types::TimestampMillis;

mod cell;
mod disk;
pub mod keys;
mod memory;
mod unavailable;

pub use cell::StoreCell;
pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use unavailable::UnavailableStore;

/// Named partition for one cached entity type
///
/// Each partition holds one kind of record, keyed as described:
///
/// | Partition | Key |
/// |---|---|
/// | `ChainVaults` | chain id |
/// | `UserVaults` | wallet address (lowercased) |
/// | `FavoriteVaults` | wallet address (lowercased) |
/// | `Pagination` | view identifier |
/// | `VaultDetails` | `<chain id>:<vault address>` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    /// Per-chain vault listings
    ChainVaults,
    /// Vaults created by a wallet
    UserVaults,
    /// Vaults a wallet marked as favorite (on-chain truth, read cache here)
    FavoriteVaults,
    /// Per-view pagination state; exempt from the TTL
    Pagination,
    /// Per-vault metadata records
    VaultDetails,
}

impl Partition {
    /// All partitions, in schema order
    pub const ALL: [Partition; 5] = [
        Partition::ChainVaults,
        Partition::UserVaults,
        Partition::FavoriteVaults,
        Partition::Pagination,
        Partition::VaultDetails,
    ];

    /// Stable name used in the store file and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::ChainVaults => "chainVaults",
            Partition::UserVaults => "userVaults",
            Partition::FavoriteVaults => "favoriteVaults",
            Partition::Pagination => "pagination",
            Partition::VaultDetails => "vaultDetails",
        }
    }

    /// Whether records in this partition are subject to the cache TTL
    ///
    /// Pagination state persists indefinitely; everything else expires.
    pub fn expires(&self) -> bool {
        !matches!(self, Partition::Pagination)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Partition::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown partition '{s}'"))
    }
}

/// A stored cache record: the payload plus the time it was written
///
/// Payloads are kept as raw JSON values so one store trait covers every
/// entity type; the orchestrator (de)serializes typed payloads at the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// The cached payload
    pub value: serde_json::Value,
    /// When this record was written
    pub written_at: TimestampMillis,
}

impl StoredRecord {
    /// Creates a record stamped with the given write time
    pub fn new(value: serde_json::Value, written_at: TimestampMillis) -> Self {
        Self { value, written_at }
    }
}

/// Counters describing store activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of successful reads that found a record
    pub hits: u64,
    /// Number of reads that found nothing
    pub misses: u64,
    /// Number of records written
    pub writes: u64,
    /// Number of records deleted
    pub deletes: u64,
    /// Current number of records across all partitions
    pub records: usize,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, writes={}, deletes={}, records={}",
            self.hits, self.misses, self.writes, self.deletes, self.records
        )
    }
}

/// Trait for cache store backends
///
/// Implementations provide durable (or deliberately non-durable) partitioned
/// key-value storage for vault records.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and support concurrent access; writes
/// are last-write-wins at the granularity of a single `put`.
///
/// # Error Handling
///
/// Operations never fail silently: storage errors propagate to the caller.
/// It is the caller's choice what to do with them: the orchestrator treats a
/// failed `get` as a miss and a failed `put` as a logged non-event, while
/// store-directed operations surface them.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Retrieves the record stored under `(partition, key)`
    ///
    /// Returns `Ok(None)` when no record exists. Does not enforce the TTL;
    /// callers are expected to check the record's `written_at` before using
    /// the value.
    async fn get(&self, partition: Partition, key: &str)
        -> Result<Option<StoredRecord>, StoreError>;

    /// Stores or wholesale-overwrites the record under `(partition, key)`
    ///
    /// There is no partial merge: every successful fetch replaces the entire
    /// record. The write timestamp is supplied by the caller.
    async fn put(
        &self,
        partition: Partition,
        key: &str,
        value: serde_json::Value,
        written_at: TimestampMillis,
    ) -> Result<(), StoreError>;

    /// Removes a record if present; idempotent
    async fn delete(&self, partition: Partition, key: &str) -> Result<(), StoreError>;

    /// Removes every record in a partition
    async fn clear_partition(&self, partition: Partition) -> Result<(), StoreError>;

    /// Returns current store activity counters
    async fn stats(&self) -> StoreStats;

    /// Human-readable backend name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_names_are_stable() {
        assert_eq!(Partition::ChainVaults.as_str(), "chainVaults");
        assert_eq!(Partition::FavoriteVaults.as_str(), "favoriteVaults");
        assert_eq!(Partition::Pagination.as_str(), "pagination");
    }

    #[test]
    fn partition_round_trips_through_name() {
        for partition in Partition::ALL {
            let parsed: Partition = partition.as_str().parse().unwrap();
            assert_eq!(parsed, partition);
        }
        assert!("blockWindows".parse::<Partition>().is_err());
    }

    #[test]
    fn only_pagination_is_exempt() {
        let exempt: Vec<_> = Partition::ALL.into_iter().filter(|p| !p.expires()).collect();
        assert_eq!(exempt, vec![Partition::Pagination]);
    }
}
