//! Error types for the vaultsync library.
//!
//! This module provides strongly-typed errors for all public APIs in
//! vaultsync. It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   ([`StoreError`], [`RpcError`], [`SyncError`])
//! - **Unified error type** ([`VaultsyncError`]) for convenience when you
//!   don't need to distinguish between error sources
//!
//! # Architecture
//!
//! - [`StoreError`] - Failures of the local persistent cache store
//! - [`RpcError`] - Failures of blockchain provider and contract-call
//!   operations
//! - [`SyncError`] - The taxonomy the read-through orchestrator surfaces to
//!   the view layer
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use vaultsync::{Syncer, SyncError};
//!
//! match syncer.load_chain_vaults(8453, false).await {
//!     Ok(fetched) => println!("{} vaults ({})", fetched.data.len(), fetched.source),
//!     Err(SyncError::RemoteUnavailable(e)) => {
//!         eprintln!("no provider for that chain: {e}");
//!     }
//!     Err(SyncError::RemoteCallFailed(e)) => {
//!         eprintln!("chain read failed, showing retry action: {e}");
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use vaultsync::VaultsyncError;
//!
//! async fn refresh_all() -> Result<(), VaultsyncError> {
//!     let vaults = syncer.load_chain_vaults(8453, true).await?;
//!     // SyncError converts to VaultsyncError via From
//!     Ok(())
//! }
//! ```

mod rpc;
mod store;
mod sync;

pub use rpc::RpcError;
pub use store::StoreError;
pub use sync::SyncError;

/// Unified error type for all vaultsync operations.
///
/// Wraps the module-specific error types; each converts automatically via
/// `From`, so `?` propagates naturally across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum VaultsyncError {
    /// Error from the local persistent cache store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from blockchain provider or contract-call operations.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error surfaced by the read-through orchestrator.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}
