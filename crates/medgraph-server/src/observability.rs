//! Log output for the server binary.
//!
//! Tracing starts at `info` before the configuration is read. Once loaded,
//! `[logging] level` replaces the filter in place. `RUST_LOG` overrides both.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

const STARTUP_LEVEL: &str = "info";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing() {
    let (filter, handle) = reload::Layer::new(env_filter(STARTUP_LEVEL));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_ok();
    if installed {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Swaps the active filter for `level`.
///
/// Returns false when tracing was not initialized by [`init_tracing`].
pub fn apply_logging_level(level: &str) -> bool {
    FILTER_HANDLE
        .get()
        .is_some_and(|handle| handle.reload(env_filter(level)).is_ok())
}
