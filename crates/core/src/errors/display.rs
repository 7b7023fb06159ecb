//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::InvalidPath { path, message } => {
                write!(f, "invalid path '{}': {}", path.display(), message)
            }
            Error::OutsideTempDir { path, temp_dir } => {
                write!(
                    f,
                    "path '{}' is not inside the temporary directory '{}'",
                    path.display(),
                    temp_dir.display()
                )
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
