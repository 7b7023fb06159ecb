//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid path error
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an error for a path outside the temporary directory
    #[must_use]
    pub fn outside_temp_dir(path: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Error::OutsideTempDir {
            path: path.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// The underlying host I/O error, if this error came from the file system
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Error::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Shorthand for `io_error().map(|e| e.kind())`
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        self.io_error().map(std::io::Error::kind)
    }
}
