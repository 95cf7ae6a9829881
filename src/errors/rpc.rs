//! Shared RPC error types for blockchain provider operations.
//!
//! This module provides error types for failures that can occur when
//! resolving providers and executing contract reads or writes against them.

/// Errors that can occur during blockchain RPC operations.
///
/// Captures the failure modes of provider resolution and contract calls,
/// with context about what operation was being performed to aid debugging.
///
/// # Examples
///
/// ```rust
/// use vaultsync::RpcError;
///
/// let error = RpcError::NoProviderForChain { chain_id: 10 };
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The configured RPC endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// A provider could not be created or reached.
    #[error("Provider connection failed: {0}")]
    ProviderConnectionFailed(String),

    /// No provider is configured for the requested chain.
    ///
    /// The orchestrator surfaces this to the view layer as
    /// `RemoteUnavailable`: the chain is simply not reachable from this
    /// deployment.
    #[error("No provider configured for chain {chain_id}")]
    NoProviderForChain {
        /// The chain id the caller asked for
        chain_id: u64,
    },

    /// No chains are configured at all.
    ///
    /// Raised by cross-chain aggregate reads (user vaults, favorites) when
    /// the deployment map is empty.
    #[error("No chain deployments configured")]
    NoChainsConfigured,

    /// A contract read or write call failed.
    ///
    /// Covers reverts, timeouts and malformed responses. The operation names
    /// the contract function for debugging (e.g. `"vaultCount"`).
    #[error("Contract call failed during {operation}")]
    ContractCallFailed {
        /// Description of the call that failed
        operation: String,
        /// The underlying provider or decoding error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A contract call succeeded but returned a value this crate cannot use.
    #[error("Malformed response from {operation}: {details}")]
    InvalidResponse {
        /// Description of the call that produced the value
        operation: String,
        /// What was wrong with it
        details: String,
    },

    /// A transport-level failure occurred outside a specific contract call.
    #[error("Transport error")]
    Transport(#[from] alloy_transport::TransportError),
}

impl RpcError {
    /// Helper to create a `ContractCallFailed` error from any error type.
    pub fn contract_call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ContractCallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create an `InvalidResponse` error.
    pub fn invalid_response(operation: impl Into<String>, details: impl Into<String>) -> Self {
        RpcError::InvalidResponse {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Returns true if this error means the chain was never reachable,
    /// as opposed to a call that was attempted and failed.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            RpcError::NoProviderForChain { .. } | RpcError::NoChainsConfigured
        )
    }
}
