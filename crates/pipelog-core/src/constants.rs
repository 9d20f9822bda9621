//! Constants and default values for Pipelog

use std::path::PathBuf;

/// Default Pipelog home directory name
pub const PIPELOG_DIR: &str = ".pipelog";

/// Persisted config file name inside the Pipelog home directory
pub const CONFIG_FILE: &str = "config.json";

/// Default base name for the active log file
pub const DEFAULT_LOGFILE_NAME: &str = "logfile.dat";

/// Default directory for the retained log files
pub const DEFAULT_LOG_PATH: &str = ".";

/// Default number of log files retained, active file included
pub const DEFAULT_MAX_NUMBER_LOGFILES: usize = 5;

/// Default max log file size in bytes
pub const DEFAULT_MAX_LOGFILE_SIZE: u64 = 1_000_000;

/// Get the Pipelog home directory
pub fn pipelog_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(PIPELOG_DIR))
        .unwrap_or_else(|| PathBuf::from(PIPELOG_DIR))
}

/// Get the default persisted config path
pub fn default_config_path() -> PathBuf {
    pipelog_home().join(CONFIG_FILE)
}
