//! Tracing initialization.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, defaulting to `info` otherwise.
/// Returns an error string when a global subscriber is already
/// installed.
///
/// # Examples
///
/// ```no_run
/// fabula_core::init_tracing().expect("subscriber already set");
/// ```
pub fn init_tracing() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    info!("Tracing initialized");
    Ok(())
}
