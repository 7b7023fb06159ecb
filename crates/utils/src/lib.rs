//! Temporary files that clean up after themselves
//!
//! Three independent pieces:
//!
//! - **`temp_file`**: create a uniquely named temporary file, optionally with
//!   content, that is deleted when the process exits.
//! - **`cleanup`**: tie a cleanup action to a resource with [`ResourceGuard`]
//!   and drain pending actions at shutdown through the [`ExitRegistry`].
//! - **`remove`**: [`safe_delete`], a delete that never fails, for use as a
//!   cleanup action.

pub mod cleanup;
pub mod paths;
pub mod remove;
pub mod temp_file;
pub mod tracing;

pub use cleanup::*;
pub use paths::*;
pub use remove::*;
pub use temp_file::*;

pub use tempguard_core::{Error, Result, TempConfig};
