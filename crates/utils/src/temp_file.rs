//! Temporary files that are deleted when the process exits
//!
//! [`TempFileFactory::create`] allocates a fresh, uniquely named file in the
//! temporary directory, optionally writes initial content, and queues the
//! path in the process-wide exit registry. The caller owns the returned
//! handle; dropping it closes the file but leaves it on disk until exit.

use crate::cleanup::{exit_registry, CleanupRegistration, ResourceGuard, Trigger};
use crate::remove::safe_delete;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempguard_core::{Error, Result, ResultExt, TempConfig};

/// Creates temporary files according to a [`TempConfig`]
#[derive(Debug, Clone, Default)]
pub struct TempFileFactory {
    config: TempConfig,
}

impl TempFileFactory {
    /// Create a factory, rejecting configurations that cannot produce valid names
    pub fn new(config: TempConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a factory configured from `TEMPGUARD_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config = TempConfig::from_env().context("reading TEMPGUARD_* environment")?;
        Self::new(config)
    }

    pub fn config(&self) -> &TempConfig {
        &self.config
    }

    /// Create a new temporary file, writing `content` into it if given
    ///
    /// The file is open for reading and writing and positioned at the start.
    /// Host I/O errors are returned as [`Error::FileSystem`] with the
    /// original error as the source. If writing the content fails, the
    /// half-created file is removed before returning.
    pub fn create(&self, content: Option<&[u8]>) -> Result<TempFileHandle> {
        let dir = self.config.resolved_temp_dir()?;

        let mut named = tempfile::Builder::new()
            .prefix(&self.config.prefix)
            .suffix(&self.config.suffix)
            .rand_bytes(self.config.random_len)
            .tempfile_in(&dir)
            .map_err(|e| Error::file_system(&dir, "create temporary file", e))?;

        if let Some(content) = content {
            let path = named.path().to_path_buf();
            let file = named.as_file_mut();
            // On failure `named` is dropped, which removes the file
            let written = (|| -> io::Result<()> {
                file.write_all(content)?;
                file.flush()?;
                file.rewind()
            })();
            written.map_err(|e| Error::file_system(path, "write temporary file", e))?;
        }

        let (file, path) = named.keep()?;
        let description = format!("temporary file: {}", path.display());
        let target = path.clone();
        let registration = exit_registry().register(description, move || safe_delete(&target));

        tracing::debug!(
            path = %path.display(),
            bytes = content.map_or(0, <[u8]>::len),
            "created temporary file"
        );

        Ok(TempFileHandle {
            file,
            path,
            registration,
        })
    }

    /// Create a new temporary file containing `content`
    pub fn create_with(&self, content: impl AsRef<[u8]>) -> Result<TempFileHandle> {
        self.create(Some(content.as_ref()))
    }
}

/// Create a temporary file with the default configuration
pub fn create_temp_file(content: Option<&[u8]>) -> Result<TempFileHandle> {
    TempFileFactory::default().create(content)
}

/// Create a temporary file with the default configuration and write `content`
pub fn write_temp_file(content: impl AsRef<[u8]>) -> Result<TempFileHandle> {
    TempFileFactory::default().create_with(content)
}

/// An open temporary file and its absolute path
///
/// The file is deleted when the process exits unless [`keep`](Self::keep)
/// is called first.
#[derive(Debug)]
pub struct TempFileHandle {
    file: File,
    path: PathBuf,
    registration: CleanupRegistration,
}

impl TempFileHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// The exit registration that will delete this file
    pub fn registration(&self) -> &CleanupRegistration {
        &self.registration
    }

    /// Split into the open file and its path; deletion at exit stays scheduled
    pub fn into_parts(self) -> (File, PathBuf) {
        (self.file, self.path)
    }

    /// Cancel deletion at exit and return the open file and its path
    pub fn keep(self) -> (File, PathBuf) {
        exit_registry().unregister(self.registration.id());
        self.registration.cancel();
        (self.file, self.path)
    }

    /// Close and delete the file now
    pub fn delete(self) {
        let TempFileHandle {
            file,
            path: _,
            registration,
        } = self;
        drop(file);
        exit_registry().unregister(registration.id());
        registration.fire(Trigger::Explicit);
    }

    /// Turn into a guard that deletes the file as soon as it is dropped
    ///
    /// The file is still deleted at exit if the guard outlives the process.
    pub fn into_guard(self) -> ResourceGuard<File> {
        ResourceGuard::from_registration(self.file, self.registration)
    }
}

impl Read for TempFileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for TempFileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for TempFileHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
