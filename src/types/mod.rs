// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Core data types for cached vault records

mod pagination;
mod timestamp;
mod vault;

pub use pagination::PaginationState;
pub use timestamp::TimestampMillis;
pub use vault::{VaultDetail, VaultId, VaultSummary};
