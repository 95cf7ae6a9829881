// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache freshness policy
//!
//! A single fixed TTL applies uniformly to every record type except
//! pagination state, which persists indefinitely. The policy is a pure
//! function over a record's write timestamp; the store itself never enforces
//! it; expiry is decided at read time by the orchestrator (lazy expiration,
//! no background sweep required).

use std::time::Duration;

use crate::store::Partition;
use crate::types::TimestampMillis;

/// Default validity window for cached records: 15 minutes
pub const DEFAULT_TTL: Duration = Duration::from_secs(900);

/// Decides whether a cached record is still valid for reads
///
/// # Examples
///
/// ```
/// use vaultsync::{FreshnessPolicy, Partition, TimestampMillis};
///
/// let policy = FreshnessPolicy::default();
/// let just_written = TimestampMillis::now();
///
/// assert!(!policy.is_expired(Partition::ChainVaults, just_written));
///
/// // Pagination state never expires, no matter how old
/// let ancient = TimestampMillis::from_millis(0);
/// assert!(!policy.is_expired(Partition::Pagination, ancient));
/// assert!(policy.is_expired(Partition::ChainVaults, ancient));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    ttl: Duration,
}

impl FreshnessPolicy {
    /// Creates a policy with a custom TTL
    ///
    /// The default of [`DEFAULT_TTL`] matches the product behavior; custom
    /// TTLs exist for tests and embedders with different staleness budgets.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// The TTL this policy applies
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns true if a record written at `written_at` is past its TTL
    ///
    /// Always false for [`Partition::Pagination`].
    pub fn is_expired(&self, partition: Partition, written_at: TimestampMillis) -> bool {
        if !partition.expires() {
            return false;
        }
        written_at.is_older_than(self.ttl)
    }

    /// Convenience inverse of [`is_expired`](Self::is_expired)
    pub fn is_fresh(&self, partition: Partition, written_at: TimestampMillis) -> bool {
        !self.is_expired(partition, written_at)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
