//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for tempguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tempguard operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system operations; `source` is the host error, untouched
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A path that cannot be used as a temporary file
    InvalidPath { path: PathBuf, message: String },

    /// A path outside the temporary directory
    OutsideTempDir { path: PathBuf, temp_dir: PathBuf },

    /// Configuration errors
    Configuration { message: String },
}
