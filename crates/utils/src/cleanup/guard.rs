//! RAII guards that tie a cleanup action to the lifetime of a resource

use super::registration::{CleanupRegistration, Trigger};
use super::registry::exit_registry;
use crate::paths::{check_path, check_path_in};
use crate::remove::safe_delete;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tempguard_core::Result;

/// Owns a resource and runs a cleanup action when it is released
///
/// Dropping the guard drops the resource first and then runs the action,
/// on every exit path from the owning scope (including unwinding). The
/// action is also queued in the process-wide exit registry, so a guard that
/// is still alive at shutdown is cleaned up by the exit drain. Whichever
/// comes first wins; the action never runs twice.
pub struct ResourceGuard<R> {
    // Declared first so it is dropped before the trigger fires
    resource: R,
    release: ReleaseTrigger,
}

struct ReleaseTrigger {
    registration: CleanupRegistration,
    defer_until_exit: bool,
}

impl Drop for ReleaseTrigger {
    fn drop(&mut self) {
        if self.defer_until_exit {
            return;
        }
        exit_registry().unregister(self.registration.id());
        self.registration.fire(Trigger::Released);
    }
}

impl<R> ResourceGuard<R> {
    /// Guard `resource`; `action` runs when the guard is dropped or at exit
    pub fn new<F>(resource: R, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::with_description(resource, std::any::type_name::<R>(), action, false)
    }

    /// Guard `resource`; `action` runs only at exit, even after the guard is gone
    pub fn defer_until_exit<F>(resource: R, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::with_description(resource, std::any::type_name::<R>(), action, true)
    }

    pub(crate) fn with_description<F>(
        resource: R,
        description: impl Into<String>,
        action: F,
        defer_until_exit: bool,
    ) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let registration = exit_registry().register(description, action);
        Self {
            resource,
            release: ReleaseTrigger {
                registration,
                defer_until_exit,
            },
        }
    }

    /// Guard `resource` with a registration that is already in the exit registry
    pub(crate) fn from_registration(resource: R, registration: CleanupRegistration) -> Self {
        Self {
            resource,
            release: ReleaseTrigger {
                registration,
                defer_until_exit: false,
            },
        }
    }

    /// Run the cleanup action now, while the resource is still held
    ///
    /// Returns `false` if it had already run. Dropping the guard afterwards
    /// does nothing more.
    pub fn cleanup(&mut self) -> bool {
        exit_registry().unregister(self.release.registration.id());
        self.release.registration.fire(Trigger::Explicit)
    }

    /// Cancel the cleanup and hand back the resource
    pub fn dismiss(self) -> R {
        let ResourceGuard { resource, release } = self;
        exit_registry().unregister(release.registration.id());
        release.registration.cancel();
        resource
    }

    /// The shared registration behind this guard
    pub fn registration(&self) -> &CleanupRegistration {
        &self.release.registration
    }

    /// Whether dropping the guard leaves the cleanup to the exit drain
    pub fn is_deferred(&self) -> bool {
        self.release.defer_until_exit
    }
}

impl<R> Deref for ResourceGuard<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.resource
    }
}

impl<R> DerefMut for ResourceGuard<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.resource
    }
}

impl<R> AsRef<R> for ResourceGuard<R> {
    fn as_ref(&self) -> &R {
        &self.resource
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for ResourceGuard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuard")
            .field("resource", &self.resource)
            .field("registration", &self.release.registration)
            .field("defer_until_exit", &self.release.defer_until_exit)
            .finish()
    }
}

/// Guard `resource` with an arbitrary cleanup action
pub fn guard<R, F>(resource: R, action: F) -> ResourceGuard<R>
where
    F: FnOnce() + Send + 'static,
{
    ResourceGuard::new(resource, action)
}

/// Guard `resource` and delete `path` when it is released
///
/// The delete goes through [`safe_delete`], so a file that is already gone
/// is not an error.
pub fn guard_path<R>(resource: R, path: impl Into<PathBuf>) -> ResourceGuard<R> {
    let path = path.into();
    let description = format!("temporary file: {}", path.display());
    ResourceGuard::with_description(resource, description, move || safe_delete(&path), false)
}

/// Like [`guard_path`], but only for an existing file in the temp directory
///
/// Fails with [`Error::InvalidPath`](tempguard_core::Error::InvalidPath) for
/// an empty path or a directory, a `NotFound` file system error for a
/// missing file, and [`Error::OutsideTempDir`](tempguard_core::Error::OutsideTempDir)
/// for anything outside the host temp directory. Nothing is registered on
/// failure.
pub fn try_guard_path<R>(resource: R, path: impl AsRef<Path>) -> Result<ResourceGuard<R>> {
    let path = check_path(path)?;
    Ok(guard_path(resource, path))
}

/// [`try_guard_path`] against an explicit temp directory
pub fn try_guard_path_in<R>(
    resource: R,
    path: impl AsRef<Path>,
    temp_dir: impl AsRef<Path>,
) -> Result<ResourceGuard<R>> {
    let path = check_path_in(path, temp_dir)?;
    Ok(guard_path(resource, path))
}
