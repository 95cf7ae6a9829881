// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! One-time store initialization shared across concurrent callers

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use super::DiskStore;
use crate::errors::StoreError;

/// Async factory handle that opens a [`DiskStore`] exactly once
///
/// Multiple tasks may race to be the first to need the store; all
/// `get_or_open` calls collapse into a single underlying
/// [`DiskStore::open`], and every caller observes the same ready store. If
/// initialization fails, the cell stays empty so a later call can retry;
/// the failure is reported once, not latched forever.
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::StoreCell;
///
/// let cell = StoreCell::new("~/.cache/vaultsync/store.json");
///
/// // Concurrent callers share one initialization
/// let (a, b) = tokio::join!(cell.get_or_open(), cell.get_or_open());
/// assert!(Arc::ptr_eq(&a?, &b?));
/// ```
#[derive(Debug)]
pub struct StoreCell {
    path: PathBuf,
    cell: OnceCell<Arc<DiskStore>>,
}

impl StoreCell {
    /// Creates a cell for the store at the given path; nothing is opened yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Returns the shared store, opening it on first call
    ///
    /// Concurrent first calls collapse into one [`DiskStore::open`]; a failed
    /// open leaves the cell empty so the next call retries.
    pub async fn get_or_open(&self) -> Result<Arc<DiskStore>, StoreError> {
        let store = self
            .cell
            .get_or_try_init(|| async {
                debug!(path = %self.path.display(), "Initializing vault store");
                DiskStore::open(&self.path).await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(store))
    }

    /// Returns the store if it has already been opened
    pub fn get(&self) -> Option<Arc<DiskStore>> {
        self.cell.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn concurrent_opens_collapse_to_one_store() {
        let dir = TempDir::new().unwrap();
        let cell = StoreCell::new(dir.path().join("store.json"));

        let (a, b, c) = tokio::join!(cell.get_or_open(), cell.get_or_open(), cell.get_or_open());

        let a = a.unwrap();
        let b = b.unwrap();
        let c = c.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn failed_open_allows_retry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        // Unreadable schema: first open fails
        std::fs::write(&path, b"{\"version\": 99, \"partitions\": {}}").unwrap();
        let cell = StoreCell::new(&path);
        assert!(cell.get_or_open().await.is_err());
        assert!(cell.get().is_none());

        // Fix the file; a subsequent call retries and succeeds
        std::fs::remove_file(&path).unwrap();
        assert!(cell.get_or_open().await.is_ok());
        assert!(cell.get().is_some());
    }

    #[tokio::test]
    async fn get_before_open_is_none() {
        let dir = TempDir::new().unwrap();
        let cell = StoreCell::new(dir.path().join("store.json"));
        assert!(cell.get().is_none());
    }
}
