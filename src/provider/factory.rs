// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory for creating type-erased HTTP providers

use alloy_network::AnyNetwork;
use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::transport::ThrottleLayer;

use super::config::ProviderConfig;
use super::AnyHttpProvider;

/// Create an HTTP provider with the given configuration
///
/// The provider uses `AnyNetwork` for type erasure, enabling runtime chain
/// selection. Recommended fillers are disabled so a bare `RootProvider` comes
/// back; the vault data layer performs plain reads and node-signed writes and
/// needs no gas/nonce filling of its own.
///
/// # Examples
///
/// ```rust,ignore
/// use vaultsync::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://mainnet.base.org").with_rate_limit(10),
/// )?;
/// ```
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    let throttle = match (config.rate_limit_per_second, config.min_delay) {
        (Some(rps), Some(_)) => {
            tracing::warn!(
                "Both rate_limit_per_second and min_delay specified, using rate_limit_per_second"
            );
            Some(ThrottleLayer::per_second(rps))
        }
        (Some(rps), None) => Some(ThrottleLayer::per_second(rps)),
        (None, Some(delay)) => Some(ThrottleLayer::with_min_interval(delay)),
        (None, None) => None,
    };

    let provider = match throttle {
        Some(layer) => {
            let client = ClientBuilder::default().layer(layer).http(url);
            ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client)
        }
        None => ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<AnyNetwork>()
            .connect_http(url),
    };

    Ok(provider)
}
