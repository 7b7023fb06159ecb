//! Registry of cleanup actions that run when the process shuts down

use super::registration::{CleanupRegistration, RegistrationId, Trigger};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-wide exit registry
static EXIT_REGISTRY: Lazy<ExitRegistry> = Lazy::new(ExitRegistry::new);

/// Explicit list of cleanups to run at shutdown
///
/// The registry only holds the actions, never the resources they clean up.
/// Draining fires every pending registration once; registrations that
/// already fired elsewhere are skipped.
pub struct ExitRegistry {
    entries: Mutex<HashMap<RegistrationId, CleanupRegistration>>,
}

impl ExitRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(16)),
        }
    }

    /// Register an action and return its shared registration
    pub fn register<F>(&self, description: impl Into<String>, action: F) -> CleanupRegistration
    where
        F: FnOnce() + Send + 'static,
    {
        let registration = CleanupRegistration::new(description, action);
        self.track(registration.clone());
        registration
    }

    /// Add an existing registration
    pub fn track(&self, registration: CleanupRegistration) {
        tracing::debug!(
            id = %registration.id(),
            description = %registration.description(),
            "registered exit cleanup"
        );
        self.entries.lock().insert(registration.id(), registration);
    }

    /// Forget a registration without running it
    ///
    /// The registration itself stays pending; callers that want it gone for
    /// good should also `cancel` it.
    pub fn unregister(&self, id: RegistrationId) -> Option<CleanupRegistration> {
        self.entries.lock().remove(&id)
    }

    /// Number of registrations waiting for the drain
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Fire every registration with [`Trigger::ProcessExit`]
    ///
    /// Returns how many actions actually ran. Registrations added by the
    /// actions themselves stay queued for the next drain.
    pub fn drain(&self) -> usize {
        let pending: Vec<CleanupRegistration> = {
            let mut entries = self.entries.lock();
            entries.drain().map(|(_, registration)| registration).collect()
        };

        let total = pending.len();
        let ran = pending
            .into_iter()
            .filter(|registration| registration.fire(Trigger::ProcessExit))
            .count();

        if total > 0 {
            tracing::debug!(ran, skipped = total - ran, "drained exit cleanups");
        }
        ran
    }
}

impl Default for ExitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitRegistry")
            .field("pending", &self.len())
            .finish()
    }
}

/// The process-wide registry
///
/// Touching it installs the atexit backstop (unix) that drains it when the
/// process terminates normally.
pub fn exit_registry() -> &'static ExitRegistry {
    super::handler::install_exit_hook();
    &EXIT_REGISTRY
}

/// Drain the process-wide registry now
pub fn drain_exit_hooks() -> usize {
    EXIT_REGISTRY.drain()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_drain_runs_each_once() {
        let registry = ExitRegistry::new();
        let (a, action_a) = counter();
        let (b, action_b) = counter();
        registry.register("a", action_a);
        registry.register("b", action_b);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.drain(), 2);
        assert_eq!(registry.drain(), 0);
        assert!(registry.is_empty());
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drain_skips_already_fired() {
        let registry = ExitRegistry::new();
        let (count, action) = counter();
        let registration = registry.register("early", action);

        assert!(registration.fire(Trigger::Explicit));
        assert_eq!(registry.drain(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_keeps_action_out_of_drain() {
        let registry = ExitRegistry::new();
        let (count, action) = counter();
        let registration = registry.register("kept", action);

        assert!(registry.unregister(registration.id()).is_some());
        assert_eq!(registry.drain(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(registration.is_pending());
    }

    #[test]
    fn test_action_may_register_during_drain() {
        let registry = Arc::new(ExitRegistry::new());
        let (count, action) = counter();
        let inner = Arc::clone(&registry);
        registry.register("outer", move || {
            inner.register("inner", action);
        });

        assert_eq!(registry.drain(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.drain(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
