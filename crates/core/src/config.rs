//! Configuration for temporary file creation
//!
//! `TempConfig` decides where temporary files are created and how they are
//! named. It is plain data: build it with `Default`, deserialize it, or read
//! it from `TEMPGUARD_*` environment variables with [`TempConfig::from_env`].

use crate::constants::{
    DEFAULT_PREFIX, DEFAULT_RANDOM_LEN, DEFAULT_SUFFIX, TEMPGUARD_HANDLE_SIGNALS_VAR,
    TEMPGUARD_PREFIX_VAR, TEMPGUARD_SUFFIX_VAR, TEMPGUARD_TMPDIR_VAR,
};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for temporary file creation and cleanup handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempConfig {
    /// Directory for new temporary files; `None` means the host temp directory
    pub temp_dir: Option<PathBuf>,

    /// File name prefix
    pub prefix: String,

    /// File name suffix
    pub suffix: String,

    /// Number of random characters between prefix and suffix
    pub random_len: usize,

    /// Drain the exit registry on SIGINT/SIGTERM (unix only)
    pub handle_signals: bool,
}

impl Default for TempConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            random_len: DEFAULT_RANDOM_LEN,
            handle_signals: false,
        }
    }
}

impl TempConfig {
    /// Load the defaults overlaid with `TEMPGUARD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TempConfig::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(TEMPGUARD_TMPDIR_VAR).filter(|v| !v.is_empty()) {
            config.temp_dir = Some(PathBuf::from(dir));
        }
        if let Some(prefix) = lookup(TEMPGUARD_PREFIX_VAR) {
            config.prefix = prefix;
        }
        if let Some(suffix) = lookup(TEMPGUARD_SUFFIX_VAR) {
            config.suffix = suffix;
        }
        if let Some(raw) = lookup(TEMPGUARD_HANDLE_SIGNALS_VAR) {
            config.handle_signals = parse_bool(TEMPGUARD_HANDLE_SIGNALS_VAR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the directory new files are created in
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set the file name prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the file name suffix
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Check that the settings can produce valid file names
    pub fn validate(&self) -> Result<()> {
        if self.random_len == 0 {
            return Err(Error::configuration(
                "random_len must be at least 1 to keep names unique",
            ));
        }
        for (field, value) in [("prefix", &self.prefix), ("suffix", &self.suffix)] {
            if value.contains(['/', '\\']) {
                return Err(Error::configuration(format!(
                    "{field} '{value}' must not contain a path separator"
                )));
            }
        }
        Ok(())
    }

    /// The directory temporary files are created in, as an absolute path
    pub fn resolved_temp_dir(&self) -> Result<PathBuf> {
        let dir = self.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        std::path::absolute(&dir)
            .map_err(|e| Error::file_system(dir, "resolve temporary directory", e))
    }
}

fn parse_bool(variable: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TempConfig::default();
        assert_eq!(config.prefix, "atexit_");
        assert_eq!(config.suffix, ".atexit");
        assert!(config.temp_dir.is_none());
        assert!(!config.handle_signals);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = TempConfig::from_lookup(lookup_from(&[
            (TEMPGUARD_TMPDIR_VAR, "/var/scratch"),
            (TEMPGUARD_PREFIX_VAR, "job_"),
            (TEMPGUARD_SUFFIX_VAR, ".tmp"),
            (TEMPGUARD_HANDLE_SIGNALS_VAR, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.temp_dir, Some(PathBuf::from("/var/scratch")));
        assert_eq!(config.prefix, "job_");
        assert_eq!(config.suffix, ".tmp");
        assert!(config.handle_signals);
    }

    #[test]
    fn test_empty_tmpdir_falls_back_to_host() {
        let config = TempConfig::from_lookup(lookup_from(&[(TEMPGUARD_TMPDIR_VAR, "")])).unwrap();
        assert!(config.temp_dir.is_none());
    }

    #[test]
    fn test_bad_boolean_is_rejected() {
        let err = TempConfig::from_lookup(lookup_from(&[(TEMPGUARD_HANDLE_SIGNALS_VAR, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(TEMPGUARD_HANDLE_SIGNALS_VAR));
    }

    #[test]
    fn test_separator_in_prefix_is_rejected() {
        let config = TempConfig::default().with_prefix("../escape");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_random_len_is_rejected() {
        let config = TempConfig {
            random_len: 0,
            ..TempConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_temp_dir_is_absolute() {
        let config = TempConfig::default().with_temp_dir("relative/scratch");
        let dir = config.resolved_temp_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("relative/scratch"));

        let host = TempConfig::default().resolved_temp_dir().unwrap();
        assert!(host.is_absolute());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var(TEMPGUARD_PREFIX_VAR, "envtest_");
        let config = TempConfig::from_env();
        std::env::remove_var(TEMPGUARD_PREFIX_VAR);

        assert_eq!(config.unwrap().prefix, "envtest_");
    }
}
