//! Conversion implementations for error types

use super::types::Error;
use std::path::PathBuf;

// Prefer Error::file_system where the path is known
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(error: tempfile::PersistError) -> Self {
        let path = error.file.path().to_path_buf();
        Error::FileSystem {
            path,
            operation: "keep temporary file".to_string(),
            source: error.error,
        }
    }
}
