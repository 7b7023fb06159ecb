//! Constants used throughout the tempguard workspace

// Naming defaults for generated temporary files
pub const DEFAULT_PREFIX: &str = "atexit_";
pub const DEFAULT_SUFFIX: &str = ".atexit";
pub const DEFAULT_RANDOM_LEN: usize = 8;

// Environment variable names
pub const TEMPGUARD_TMPDIR_VAR: &str = "TEMPGUARD_TMPDIR";
pub const TEMPGUARD_PREFIX_VAR: &str = "TEMPGUARD_PREFIX";
pub const TEMPGUARD_SUFFIX_VAR: &str = "TEMPGUARD_SUFFIX";
pub const TEMPGUARD_HANDLE_SIGNALS_VAR: &str = "TEMPGUARD_HANDLE_SIGNALS";
pub const TEMPGUARD_LOG_VAR: &str = "TEMPGUARD_LOG";

// Default log filter when TEMPGUARD_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
