//! Logging setup for tempguard
//!
//! Library code only emits `tracing` events. Binaries that want to see them
//! call [`init`] once; the filter comes from `TEMPGUARD_LOG`.

use tempguard_core::{DEFAULT_LOG_FILTER, TEMPGUARD_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// Logs go to stderr. The filter comes from `TEMPGUARD_LOG` and defaults to
/// `warn`, so cleanup stays quiet unless asked. Fails if a global subscriber
/// is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(TEMPGUARD_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
