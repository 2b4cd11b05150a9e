//! Tracing subscriber setup.

use ledgerlink_domain::{LedgerLinkError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails, rather than
/// panicking, when a global subscriber is already installed.
///
/// # Errors
/// Returns `LedgerLinkError::Config` for an invalid filter directive and
/// `LedgerLinkError::Internal` when a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|err| {
            LedgerLinkError::Config(format!("Invalid log level '{}': {err}", config.level))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|err| {
        LedgerLinkError::Internal(format!("failed to install tracing subscriber: {err}"))
    })
}
