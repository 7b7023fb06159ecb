//! Path checks for files that live in the temporary directory

use std::path::{Component, Path, PathBuf};
use tempguard_core::{Error, Result, TempConfig};

/// The host temporary directory as an absolute path
pub fn host_temp_dir() -> Result<PathBuf> {
    TempConfig::default().resolved_temp_dir()
}

/// Whether `path` lies inside `dir`
///
/// Paths containing `..` are always rejected. Otherwise the parent of
/// `path` is canonicalised and joined with the file name, so symlinked temp
/// directories (`/tmp` vs `/private/tmp`) still match and a symlinked
/// directory pointing elsewhere does not. The file itself need not exist.
/// When the parent cannot be resolved the comparison is lexical.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return false;
    }

    let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let resolved = path.file_name().and_then(|name| {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Some(parent.canonicalize().ok()?.join(name))
    });

    match resolved {
        Some(resolved) => resolved.starts_with(&dir),
        None => path.starts_with(&dir),
    }
}

/// Check that `path` is an existing regular file inside the host temp directory
pub fn check_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    check_path_in(path, host_temp_dir()?)
}

/// Like [`check_path`] with an explicit temporary directory
pub fn check_path_in(path: impl AsRef<Path>, temp_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let temp_dir = temp_dir.as_ref();

    if path.as_os_str().is_empty() {
        return Err(Error::invalid_path(path, "path cannot be empty"));
    }

    let metadata = path
        .metadata()
        .map_err(|e| Error::file_system(path, "inspect path", e))?;
    if !metadata.is_file() {
        return Err(Error::invalid_path(path, "path is not a file"));
    }
    if !is_within(path, temp_dir) {
        return Err(Error::outside_temp_dir(path, temp_dir));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    #[test]
    fn test_valid_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("valid.atexit");
        fs::write(&path, b"").unwrap();

        assert_eq!(check_path_in(&path, dir.path()).unwrap(), path);
    }

    #[test]
    fn test_empty_path() {
        let err = check_path("").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_nonexistent_file() {
        let dir = tempdir().unwrap();
        let err = check_path_in(dir.path().join("nonexistent.txt"), dir.path()).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_not_a_file() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let err = check_path_in(&sub, dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_path_outside_tempdir() {
        let temp = tempdir().unwrap();
        let other = tempdir().unwrap();
        let path = other.path().join("outside.txt");
        fs::write(&path, b"").unwrap();

        let err = check_path_in(&path, temp.path()).unwrap_err();
        assert!(matches!(err, Error::OutsideTempDir { .. }));
    }

    #[test]
    fn test_is_within_handles_missing_files() {
        let dir = tempdir().unwrap();
        assert!(is_within(&dir.path().join("later.atexit"), dir.path()));
        assert!(!is_within(Path::new("/definitely/not/here"), dir.path()));
    }

    #[test]
    fn test_parent_dir_escape_is_rejected() {
        let temp = tempdir().unwrap();
        let other = tempdir().unwrap();
        let victim = other.path().join("victim.txt");
        fs::write(&victim, b"").unwrap();
        let sneaky = temp
            .path()
            .join("..")
            .join(other.path().file_name().unwrap())
            .join("victim.txt");

        assert!(!is_within(&sneaky, temp.path()));
        let err = check_path_in(&sneaky, temp.path()).unwrap_err();
        assert!(matches!(err, Error::OutsideTempDir { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_temp_dir_is_rejected() {
        let temp = tempdir().unwrap();
        let other = tempdir().unwrap();
        fs::write(other.path().join("victim.txt"), b"").unwrap();
        let link = temp.path().join("escape");
        std::os::unix::fs::symlink(other.path(), &link).unwrap();

        assert!(!is_within(&link.join("victim.txt"), temp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_within_follows_symlinked_dir() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        fs::write(real.join("f.atexit"), b"").unwrap();

        assert!(is_within(&link.join("f.atexit"), &real));
    }
}
