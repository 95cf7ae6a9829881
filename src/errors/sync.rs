//! Error taxonomy surfaced by the read-through orchestrator.
//!
//! This is the small, flat set of errors the view layer sees. There is no
//! retry or backoff behind it: a failed fetch is reported once and the user
//! decides whether to hit "Sync" / "Try Again".

use super::{RpcError, StoreError};

/// Errors surfaced to the view layer by [`Syncer`](crate::sync::Syncer)
/// operations.
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::SyncError;
///
/// match syncer.load_favorites(wallet, false).await {
///     Ok(fetched) => render(fetched),
///     Err(SyncError::InvalidRequest { reason }) => show_form_error(&reason),
///     Err(e) => show_toast(&e.to_string()),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Required identifying parameters were missing or nonsensical.
    ///
    /// Raised before any cache or network access, e.g. for a zero wallet
    /// address or an empty view identifier.
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// What was missing or wrong
        reason: String,
    },

    /// No reachable data provider for the requested chain.
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(#[source] RpcError),

    /// The read call to the external ledger failed.
    ///
    /// Reverted, timed out, or returned a malformed response. Any previously
    /// cached value is left untouched by the failure.
    #[error("Remote call failed: {0}")]
    RemoteCallFailed(#[source] RpcError),

    /// The local storage facility is unavailable or failed.
    ///
    /// Only surfaced by store-directed operations (cache clears, pagination
    /// saves); read-through loads degrade to the network path instead.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl SyncError {
    /// Helper to create an `InvalidRequest` error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        SyncError::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Classifies a remote-read failure.
    ///
    /// Provider-resolution failures become [`SyncError::RemoteUnavailable`];
    /// everything else was an attempted call that failed and becomes
    /// [`SyncError::RemoteCallFailed`].
    pub fn remote(error: RpcError) -> Self {
        if error.is_unreachable() {
            SyncError::RemoteUnavailable(error)
        } else {
            SyncError::RemoteCallFailed(error)
        }
    }
}
