// ABOUTME: Production logging setup with env-filter support
// ABOUTME: Structured tracing output for all server components
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// Respects `RUST_LOG` when set, defaulting to `info` for the crate and
/// `warn` elsewhere. Safe to call once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,fitweave_server=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
