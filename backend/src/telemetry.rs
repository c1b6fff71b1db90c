//! Process-wide tracing subscriber.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install a JSON subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls only log a warning.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
