// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Disk-based store implementation with file locking and schema versioning

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{Partition, StoreStats, StoredRecord, VaultStore};
use crate::errors::StoreError;
use crate::types::TimestampMillis;

/// Current store schema version
///
/// Version 1 stored favorites inline on the user-vaults records; version 2
/// gives favorites their own partition.
const SCHEMA_VERSION: u32 = 2;

/// Records of one partition, keyed by normalized entity key
type PartitionRecords = HashMap<String, StoredRecord>;

/// Serialized store format (versioned)
#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    /// Store schema version
    version: u32,
    /// Partition name → records
    partitions: HashMap<String, PartitionRecords>,
}

impl Default for StoreData {
    fn default() -> Self {
        let mut data = Self {
            version: SCHEMA_VERSION,
            partitions: HashMap::new(),
        };
        data.ensure_partitions();
        data
    }
}

impl StoreData {
    /// Creates any missing partition maps; never touches existing ones
    fn ensure_partitions(&mut self) -> bool {
        let mut changed = false;
        for partition in Partition::ALL {
            if !self.partitions.contains_key(partition.as_str()) {
                self.partitions
                    .insert(partition.as_str().to_string(), PartitionRecords::new());
                changed = true;
            }
        }
        changed
    }

    /// Migrates data written by an older schema up to the current version
    ///
    /// Migration is strictly additive: missing partitions are created, every
    /// existing partition and its records are preserved verbatim. Returns
    /// true if anything changed and the file should be rewritten.
    fn migrate(&mut self) -> bool {
        let mut changed = self.ensure_partitions();
        if self.version < SCHEMA_VERSION {
            info!(
                from = self.version,
                to = SCHEMA_VERSION,
                "Migrating store schema"
            );
            self.version = SCHEMA_VERSION;
            changed = true;
        }
        changed
    }

    fn records(&self, partition: Partition) -> Option<&PartitionRecords> {
        self.partitions.get(partition.as_str())
    }

    fn records_mut(&mut self, partition: Partition) -> &mut PartitionRecords {
        self.partitions
            .entry(partition.as_str().to_string())
            .or_default()
    }

    fn total_records(&self) -> usize {
        self.partitions.values().map(HashMap::len).sum()
    }
}

/// Internal state for the disk store
#[derive(Debug, Default)]
struct DiskStoreState {
    /// Store activity counters (in-memory only, not persisted)
    stats: StoreStats,
}

/// Durable store backed by a versioned JSON file
///
/// Persists vault records to disk with:
/// - Advisory file locking for multi-process safety
/// - Schema versioning with additive migration: bumping the version creates
///   missing partitions but never destroys existing ones
/// - Atomic temp-file-and-rename writes
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::DiskStore;
///
/// let store = DiskStore::open("~/.cache/vaultsync/store.json").await?;
/// ```
///
/// # Initialization
///
/// [`open`](Self::open) is the async factory that performs the one-time
/// schema setup (creating the file and its partitions). It is idempotent:
/// opening an existing store only validates and migrates. For collapsing
/// concurrent opens into a single setup, wrap the path in a
/// [`StoreCell`](super::StoreCell).
///
/// # Performance
///
/// Every operation re-reads the backing file under a shared lock, mirroring
/// how browser-local storage behaves: the file is the source of truth and
/// other processes may have written it between calls.
#[derive(Debug)]
pub struct DiskStore {
    path: PathBuf,
    state: Mutex<DiskStoreState>,
}

impl DiskStore {
    /// Opens (and on first use, creates) the store at the given path
    ///
    /// Validates that the parent directory exists and is writable, creating
    /// it if necessary, then loads the file, migrating older schemas in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the path is unusable,
    /// [`StoreError::SchemaVersion`] if the file was written by a newer
    /// build.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            state: Mutex::new(DiskStoreState::default()),
        };
        store.validate_path()?;

        // One-time schema setup: load whatever is there, migrate, and persist
        // so the partitions exist on disk before the first put.
        let mut data = store.load().await?;
        if data.migrate() || !store.path.exists() {
            store.save(&data).await?;
        }

        info!(
            path = %store.path.display(),
            records = data.total_records(),
            version = data.version,
            "Opened vault store"
        );
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn validate_path(&self) -> Result<(), StoreError> {
        let parent = self.path.parent().ok_or_else(|| {
            StoreError::io(
                self.path.display().to_string(),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "store path has no parent directory",
                ),
            )
        })?;

        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::io(parent.display().to_string(), e))?;
            debug!(path = %parent.display(), "Created store directory");
        }

        // Probe writability up front so a read-only profile fails at open
        // rather than on the first put.
        let probe = if parent.as_os_str().is_empty() {
            PathBuf::from(".store_write_test")
        } else {
            parent.join(".store_write_test")
        };
        std::fs::write(&probe, b"test")
            .map_err(|e| StoreError::io(probe.display().to_string(), e))?;
        let _ = std::fs::remove_file(&probe);

        Ok(())
    }

    /// Loads store data from disk with a shared file lock
    async fn load(&self) -> Result<StoreData, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store file does not exist, using empty store");
            return Ok(StoreData::default());
        }

        let file = File::open(&self.path)
            .map_err(|e| StoreError::io(self.path.display().to_string(), e))?;

        file.lock_shared()
            .map_err(|e| StoreError::io(self.path.display().to_string(), e))?;

        let data: StoreData = serde_json::from_reader(&file).map_err(|e| {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to parse store file"
            );
            StoreError::Serialization(e)
        })?;

        drop(file);

        if data.version > SCHEMA_VERSION {
            return Err(StoreError::SchemaVersion {
                found: data.version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(data)
    }

    /// Saves store data to disk with an exclusive lock and atomic rename
    async fn save(&self, data: &StoreData) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(data)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| StoreError::io(temp_path.display().to_string(), e))?;

        let file = File::open(&temp_path)
            .map_err(|e| StoreError::io(temp_path.display().to_string(), e))?;
        file.lock()
            .map_err(|e| StoreError::io(temp_path.display().to_string(), e))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(self.path.display().to_string(), e))?;

        drop(file);

        debug!(
            path = %self.path.display(),
            records = data.total_records(),
            "Saved vault store"
        );
        Ok(())
    }
}

#[async_trait]
impl VaultStore for DiskStore {
    async fn get(
        &self,
        partition: Partition,
        key: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let mut state = self.state.lock().await;
        let data = self.load().await?;

        match data.records(partition).and_then(|records| records.get(key)) {
            Some(record) => {
                state.stats.hits += 1;
                debug!(%partition, key, "Store hit (disk)");
                Ok(Some(record.clone()))
            }
            None => {
                state.stats.misses += 1;
                debug!(%partition, key, "Store miss (disk)");
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
        let mut data = self.load().await.unwrap_or_default();

        debug!(%partition, key, "Writing record to disk store");
        data.records_mut(partition)
            .insert(key.to_string(), StoredRecord::new(value, written_at));

        state.stats.writes += 1;
        state.stats.records = data.total_records();

        self.save(&data).await
    }

    async fn delete(&self, partition: Partition, key: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut data = self.load().await?;

        if data.records_mut(partition).remove(key).is_some() {
            debug!(%partition, key, "Deleted record from disk store");
            state.stats.deletes += 1;
            state.stats.records = data.total_records();
            self.save(&data).await?;
        }
        Ok(())
    }

    async fn clear_partition(&self, partition: Partition) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut data = self.load().await?;

        let records = data.records_mut(partition);
        let removed = records.len();
        records.clear();

        if removed > 0 {
            debug!(%partition, removed, "Cleared partition");
            state.stats.deletes += removed as u64;
            state.stats.records = data.total_records();
            self.save(&data).await?;
        }
        Ok(())
    }

    async fn stats(&self) -> StoreStats {
        let mut state = self.state.lock().await;
        if let Ok(data) = self.load().await {
            state.stats.records = data.total_records();
        }
        state.stats.clone()
    }

    fn name(&self) -> &'static str {
        "DiskStore"
    }
}
