//! One-shot cleanup registrations shared between an owner and the exit registry

use parking_lot::Mutex;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type CleanupFn = Box<dyn FnOnce() + Send + 'static>;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a registration, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

impl RegistrationId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What caused a registration to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The exit registry was drained at shutdown
    ProcessExit,
    /// The owning guard was dropped
    Released,
    /// Someone called `fire` or `cleanup` directly
    Explicit,
}

enum State {
    Pending(CleanupFn),
    Fired(Trigger),
    Cancelled,
}

struct Inner {
    id: RegistrationId,
    description: String,
    state: Mutex<State>,
}

/// A cleanup action that runs at most once
///
/// Clones share the same action. The first call to [`fire`](Self::fire)
/// runs it; every later call, from any clone or thread, is a no-op.
/// Panics raised by the action are caught and discarded.
#[derive(Clone)]
pub struct CleanupRegistration {
    inner: Arc<Inner>,
}

impl CleanupRegistration {
    pub(crate) fn new<F>(description: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                id: RegistrationId::next(),
                description: description.into(),
                state: Mutex::new(State::Pending(Box::new(action))),
            }),
        }
    }

    pub fn id(&self) -> RegistrationId {
        self.inner.id
    }

    pub fn description(&self) -> &str {
        &self.inner.description
    }

    /// Run the action if it has not run yet. Returns whether it ran.
    pub fn fire(&self, trigger: Trigger) -> bool {
        let action = {
            let mut state = self.inner.state.lock();
            match std::mem::replace(&mut *state, State::Fired(trigger)) {
                State::Pending(action) => action,
                previous => {
                    *state = previous;
                    return false;
                }
            }
        };

        tracing::trace!(
            id = %self.inner.id,
            description = %self.inner.description,
            ?trigger,
            "running cleanup action"
        );

        if panic::catch_unwind(AssertUnwindSafe(action)).is_err() {
            tracing::warn!(
                id = %self.inner.id,
                description = %self.inner.description,
                "cleanup action panicked; ignoring"
            );
        }
        true
    }

    /// Drop the action without running it. Returns whether it was still pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.state.lock();
        if matches!(*state, State::Pending(_)) {
            *state = State::Cancelled;
            true
        } else {
            false
        }
    }

    /// Whether the action can still run
    pub fn is_pending(&self) -> bool {
        matches!(*self.inner.state.lock(), State::Pending(_))
    }

    /// The trigger that ran the action, if it has run
    pub fn fired_by(&self) -> Option<Trigger> {
        match *self.inner.state.lock() {
            State::Fired(trigger) => Some(trigger),
            _ => None,
        }
    }
}

impl fmt::Debug for CleanupRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.inner.state.lock() {
            State::Pending(_) => "pending".to_string(),
            State::Fired(trigger) => format!("fired({trigger:?})"),
            State::Cancelled => "cancelled".to_string(),
        };
        f.debug_struct("CleanupRegistration")
            .field("id", &self.inner.id)
            .field("description", &self.inner.description)
            .field("state", &state)
            .finish()
    }
}
