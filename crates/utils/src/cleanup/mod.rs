//! Resource cleanup at release and at process exit
//!
//! - [`CleanupRegistration`]: a one-shot action shared by its owner and the
//!   exit registry.
//! - [`ExitRegistry`]: the explicit list of actions drained at shutdown.
//! - [`ResourceGuard`]: RAII owner that runs its action on drop.
//! - [`init_cleanup_handler`]: wires the process-wide registry to shutdown.

mod guard;
mod handler;
mod registration;
mod registry;

pub use guard::{guard, guard_path, try_guard_path, try_guard_path_in, ResourceGuard};
pub use handler::{init_cleanup_handler, ShutdownGuard};
pub use registration::{CleanupRegistration, RegistrationId, Trigger};
pub use registry::{drain_exit_hooks, exit_registry, ExitRegistry};
