//! Core errors, constants and configuration for `tempguard`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace. Creation failures surface here; cleanup failures never do.
//! - **`config`**: `TempConfig`, which decides where temporary files live and
//!   how they are named.
//! - **`constants`**: environment variable names and naming defaults.

pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    config::TempConfig,
    constants::*,
    errors::{Error, Result, ResultExt},
};
