// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport-layer middleware for RPC clients
//!
//! Public RPC endpoints rate-limit aggressively; the throttle layer here
//! spaces outgoing requests so a burst of vault reads does not trip them.

mod throttle;

pub use throttle::ThrottleLayer;
