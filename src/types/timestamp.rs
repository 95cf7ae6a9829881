// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Write-time stamps carried by every cache record

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Unix timestamp in milliseconds recording when a cache record was written
///
/// Every record in the vault store carries one of these. Freshness decisions
/// compare the record's age against the configured TTL; the view layer also
/// surfaces the stamp so users can judge how stale a "Cached" result is.
///
/// # Examples
///
/// ```
/// use vaultsync::TimestampMillis;
/// use std::time::Duration;
///
/// let ts = TimestampMillis::now();
/// std::thread::sleep(Duration::from_millis(10));
/// let age = ts.age_since_now();
/// assert!(age >= Duration::from_millis(10));
/// assert!(age < Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMillis(u128);

impl TimestampMillis {
    /// Creates a new timestamp representing the current time
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(millis)
    }

    /// Creates a timestamp from a raw millisecond value
    ///
    /// Useful for reconstructing stamps from persisted data and for backdating
    /// records in tests.
    pub fn from_millis(millis: u128) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value
    pub fn as_millis(&self) -> u128 {
        self.0
    }

    /// Calculates the age of this timestamp relative to now
    ///
    /// Returns the duration between this timestamp and the current time.
    /// If this timestamp is in the future, returns zero duration.
    pub fn age_since_now(&self) -> Duration {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let age_millis = now_millis.saturating_sub(self.0);
        Duration::from_millis(age_millis as u64)
    }

    /// Checks if this timestamp is older than the given duration
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultsync::TimestampMillis;
    /// use std::time::Duration;
    ///
    /// let ts = TimestampMillis::now();
    /// std::thread::sleep(Duration::from_millis(10));
    /// assert!(ts.is_older_than(Duration::from_millis(5)));
    /// assert!(!ts.is_older_than(Duration::from_secs(10)));
    /// ```
    pub fn is_older_than(&self, duration: Duration) -> bool {
        self.age_since_now() > duration
    }
}

impl Default for TimestampMillis {
    fn default() -> Self {
        Self::now()
    }
}
