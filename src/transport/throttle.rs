// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based request throttle for Alloy RPC providers.
//!
//! Vault reads arrive in UI-driven bursts (opening a listing fires one call
//! per visible vault). Rather than a token bucket, this layer enforces a
//! minimum interval between consecutive requests, which is what public RPC
//! endpoints actually police.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use tower::Layer;

/// A Tower layer that enforces a minimum interval between requests.
///
/// Each request reserves the next free send slot and sleeps until it arrives;
/// concurrent requests are serialized into evenly spaced slots.
///
/// # Example
///
/// ```rust,ignore
/// use vaultsync::transport::ThrottleLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// // At most 10 requests per second
/// let client = ClientBuilder::default()
///     .layer(ThrottleLayer::per_second(10))
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct ThrottleLayer {
    min_interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl ThrottleLayer {
    /// Creates a throttle with the given minimum interval between requests.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vaultsync::transport::ThrottleLayer;
    /// use std::time::Duration;
    ///
    /// // At least 100ms between requests
    /// let layer = ThrottleLayer::with_min_interval(Duration::from_millis(100));
    /// ```
    pub fn with_min_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a throttle from requests per second.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vaultsync::transport::ThrottleLayer;
    ///
    /// // 5 requests per second, i.e. one every 200ms
    /// let layer = ThrottleLayer::per_second(5);
    /// ```
    pub fn per_second(requests: u32) -> Self {
        let requests = requests.max(1);
        Self::with_min_interval(Duration::from_secs(1) / requests)
    }

    /// Reserves the next send slot and returns when it may be used.
    async fn reserve(&self) -> Instant {
        let mut next = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + self.min_interval);
        slot
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = ThrottleService<S>;

    fn layer(&self, service: S) -> Self::Service {
        ThrottleService {
            service,
            throttle: self.clone(),
        }
    }
}

/// A Tower service that delays each request until its reserved slot.
#[derive(Clone, Debug)]
pub struct ThrottleService<S> {
    service: S,
    throttle: ThrottleLayer,
}

impl<S, Request> tower::Service<Request> for ThrottleService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let throttle = self.throttle.clone();
        let mut service = self.service.clone();

        Box::pin(async move {
            let slot = throttle.reserve().await;
            tokio::time::sleep_until(tokio::time::Instant::from_std(slot)).await;
            service.call(request).await
        })
    }
}
