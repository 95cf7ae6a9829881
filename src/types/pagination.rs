// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-view pagination state
//!
//! Keyed by a view identifier string and persisted indefinitely: unlike every
//! other record type, pagination state is exempt from the cache TTL. A user
//! returning to a listing days later lands on the page they left.

use serde::{Deserialize, Serialize};

/// Saved listing position for a single view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current page number (zero-based)
    pub page: u32,
    /// Free-text search filter
    pub search: String,
    /// Selected chain filter, if any
    pub chain_filter: Option<u64>,
}

impl PaginationState {
    /// Creates pagination state for a specific page with no filters
    pub fn at_page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}
