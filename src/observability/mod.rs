//! Tracing initialization.
//!
//! The crate logs through `tracing` everywhere; wiring those events to an
//! output is the embedding process's decision. The shim binary (and any host
//! that wants the default) calls [`init_tracing`] to install a formatted
//! stderr subscriber filtered by the configured level, with `RUST_LOG`
//! taking precedence when set.

use crate::Config;
use tracing_subscriber::EnvFilter;

/// Installs the global stderr subscriber.
///
/// The filter comes from `RUST_LOG` when present, otherwise from
/// `config.trace_level`, defaulting to `info`. Idempotent: only the first
/// call installs a subscriber, later calls are ignored.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
