//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

use crate::error::{CoreError, CoreResult};

/// Build the filter used by [`init_tracing`].
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
///
/// # Errors
///
/// Returns [`CoreError::Config`] if `log_level` is not a valid filter directive.
pub fn build_filter(log_level: &str) -> CoreResult<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    EnvFilter::try_new(log_level)
        .map_err(|e| CoreError::Config(format!("invalid log level filter {log_level}: {e}")))
}

/// Install a global fmt subscriber.
///
/// # Errors
///
/// Returns [`CoreError::Config`] if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(log_level: &str) -> CoreResult<()> {
    let filter = build_filter(log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| CoreError::Config(format!("tracing already initialised: {e}")))?;

    tracing::debug!(log_level, "Tracing initialised");
    Ok(())
}
