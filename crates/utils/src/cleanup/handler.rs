//! Shutdown wiring for the process-wide exit registry
//!
//! Two ways in: the atexit backstop, installed automatically the first time
//! the global registry is used, and [`init_cleanup_handler`], which returns a
//! guard to hold in `main` so the drain point is visible in the code.

use super::registry::drain_exit_hooks;
use std::sync::Once;
use tempguard_core::TempConfig;

static EXIT_HOOK: Once = Once::new();
#[cfg(unix)]
static SIGNAL_HANDLER: Once = Once::new();

#[cfg(unix)]
extern "C" fn run_exit_hooks() {
    // Must not unwind into libc
    let _ = std::panic::catch_unwind(drain_exit_hooks);
}

/// Install the atexit backstop (idempotent)
pub(crate) fn install_exit_hook() {
    EXIT_HOOK.call_once(|| {
        #[cfg(unix)]
        {
            // SAFETY: `run_exit_hooks` is a plain `extern "C" fn()` that never unwinds.
            let rc = unsafe { libc::atexit(run_exit_hooks) };
            if rc != 0 {
                tracing::warn!("failed to install atexit cleanup hook; call drain_exit_hooks() before exiting");
            }
        }
    });
}

/// Drains the process-wide registry when dropped
///
/// Hold it for the lifetime of `main`. Dropping it (normal return or an
/// unwinding panic) runs every pending exit cleanup.
#[must_use = "the exit registry is drained when this guard is dropped"]
#[derive(Debug)]
pub struct ShutdownGuard {
    _private: (),
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        let ran = drain_exit_hooks();
        tracing::debug!(ran, "shutdown guard drained exit cleanups");
    }
}

/// Initialize cleanup handling (call once at startup)
///
/// Installs the atexit backstop and, if `config.handle_signals` is set,
/// a SIGINT/SIGTERM handler that drains the registry and exits with
/// `128 + signal`.
pub fn init_cleanup_handler(config: &TempConfig) -> ShutdownGuard {
    install_exit_hook();

    if config.handle_signals {
        install_signal_handler();
    }

    ShutdownGuard { _private: () }
}

#[cfg(unix)]
fn install_signal_handler() {
    SIGNAL_HANDLER.call_once(|| {
        use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};

        let mut signals = match Signals::new([SIGINT, SIGTERM]) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to register signal handlers: {e}");
                return;
            }
        };

        let spawned = std::thread::Builder::new()
            .name("tempguard-signals".to_string())
            .spawn(move || {
                #[allow(clippy::never_loop)]
                for sig in signals.forever() {
                    tracing::info!("received signal {sig}, removing temporary files");
                    drain_exit_hooks();
                    std::process::exit(128 + sig);
                }
            });

        if let Err(e) = spawned {
            tracing::warn!("failed to spawn signal handler thread: {e}");
        }
    });
}

#[cfg(not(unix))]
fn install_signal_handler() {
    tracing::debug!("signal handling is only available on unix");
}
