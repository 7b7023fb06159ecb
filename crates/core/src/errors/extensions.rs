//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    ///
    /// File system errors keep their host `source` and the context is folded
    /// into the operation name. Everything else turns into a configuration
    /// error prefixed with the context.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

fn attach(error: Error, message: String) -> Error {
    match error {
        Error::FileSystem {
            path,
            operation,
            source,
        } => {
            // Bare `From<io::Error>` conversions carry no operation yet
            let operation = if operation == "unknown" {
                message
            } else {
                format!("{message} ({operation})")
            };
            Error::FileSystem {
                path,
                operation,
                source,
            }
        }
        Error::Configuration { message: inner } => Error::Configuration {
            message: format!("{message}: {inner}"),
        },
        other => Error::Configuration {
            message: format!("{message}: {other}"),
        },
    }
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach(e.into(), message.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach(e.into(), f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_context_preserves_io_source() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.context("remove file").unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("remove file"));
        assert!(!err.to_string().contains("unknown"));
    }

    #[test]
    fn test_context_wraps_named_operation() {
        let result: Result<()> = Err(Error::file_system(
            "/tmp/x",
            "write temporary file",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        ));
        let err = result.context("create temporary file").unwrap_err();
        match err {
            Error::FileSystem { operation, .. } => {
                assert_eq!(operation, "create temporary file (write temporary file)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_with_context_wraps_non_io_errors() {
        let result: Result<()> = Err(Error::configuration("bad prefix"));
        let err = result
            .with_context(|| "loading config".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.to_string(),
            "configuration error: loading config: bad prefix"
        );
    }
}
