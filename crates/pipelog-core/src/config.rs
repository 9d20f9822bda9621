//! Configuration resolution for Pipelog
//!
//! Effective settings are built in three layers, later layers winning:
//! built-in defaults, an optional persisted JSON config file, and
//! explicit command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::*;
use crate::error::{Error, Result};

/// Persisted configuration file shape (config.json)
///
/// Every field is optional; missing fields take the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_logfile_name")]
    pub logfile_name: String,
    #[serde(default = "default_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_number_logfiles")]
    pub max_number_logfiles: usize,
    #[serde(default = "default_max_logfile_size")]
    pub max_logfile_size: u64,
    #[serde(default)]
    pub timestamp: bool,
}

fn default_logfile_name() -> String {
    DEFAULT_LOGFILE_NAME.to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn default_max_number_logfiles() -> usize {
    DEFAULT_MAX_NUMBER_LOGFILES
}

fn default_max_logfile_size() -> u64 {
    DEFAULT_MAX_LOGFILE_SIZE
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            logfile_name: default_logfile_name(),
            path: default_path(),
            max_number_logfiles: default_max_number_logfiles(),
            max_logfile_size: default_max_logfile_size(),
            timestamp: false,
        }
    }
}

impl ConfigFile {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse JSON config content
    pub fn from_json(content: &str) -> Result<Self> {
        let config: ConfigFile = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Load the config-file layer for a run.
    ///
    /// An explicit path that cannot be read or parsed is substituted with
    /// defaults after a warning; it never aborts the run. With no explicit
    /// path, the persisted config in the Pipelog home directory is used
    /// when present.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let persisted = default_config_path();
                if !persisted.exists() {
                    return Self::default();
                }
                persisted
            }
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Config file {} is unusable, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write the default configuration as JSON to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply command-line overrides and validate into a CaptureSpec
    pub fn into_spec(self, overrides: Overrides) -> Result<CaptureSpec> {
        let logfile_name = overrides.logfile_name.unwrap_or(self.logfile_name);
        if logfile_name.is_empty() {
            return Err(Error::config("logfile_name must not be empty"));
        }

        let max_files = overrides
            .max_number_logfiles
            .unwrap_or(self.max_number_logfiles);
        if max_files < 1 {
            return Err(Error::InvalidRetention(max_files));
        }

        let max_size_bytes = overrides.max_logfile_size.unwrap_or(self.max_logfile_size);
        if max_size_bytes < 1 {
            return Err(Error::InvalidMaxSize(max_size_bytes));
        }

        Ok(CaptureSpec {
            logfile_name,
            path: overrides.path.unwrap_or(self.path),
            max_files,
            max_size_bytes,
            timestamp: overrides.timestamp.unwrap_or(self.timestamp),
        })
    }
}

/// Command-line overrides applied on top of the config-file layer
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub logfile_name: Option<String>,
    pub path: Option<PathBuf>,
    pub max_number_logfiles: Option<usize>,
    pub max_logfile_size: Option<u64>,
    pub timestamp: Option<bool>,
}

/// Effective settings for one capture run, immutable after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSpec {
    /// Base name of the active log file
    pub logfile_name: String,
    /// Directory holding the retained chain
    pub path: PathBuf,
    /// Number of log files retained, active file included
    pub max_files: usize,
    /// Size in bytes above which the active file is rotated
    pub max_size_bytes: u64,
    /// Prefix every captured line with a local timestamp
    pub timestamp: bool,
}

impl CaptureSpec {
    /// Resolve defaults, the optional persisted config file, and overrides
    pub fn resolve(config_file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        ConfigFile::load_or_default(config_file).into_spec(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parse_full() {
        let config_content = r#"
{
    "logfile_name": "capture.log",
    "path": "/var/log/capture",
    "max_number_logfiles": 3,
    "max_logfile_size": 50,
    "timestamp": true
}
"#;
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.logfile_name, "capture.log");
        assert_eq!(config.path, PathBuf::from("/var/log/capture"));
        assert_eq!(config.max_number_logfiles, 3);
        assert_eq!(config.max_logfile_size, 50);
        assert!(config.timestamp);
    }

    #[test]
    fn test_config_parse_partial_takes_defaults() {
        let config = ConfigFile::from_json(r#"{"max_logfile_size": 2048}"#).unwrap();
        assert_eq!(config.max_logfile_size, 2048);
        assert_eq!(config.logfile_name, DEFAULT_LOGFILE_NAME);
        assert_eq!(config.path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(config.max_number_logfiles, DEFAULT_MAX_NUMBER_LOGFILES);
        assert!(!config.timestamp);
    }

    #[test]
    fn test_config_parse_empty_object() {
        let config = ConfigFile::from_json("{}").unwrap();
        assert_eq!(config.max_logfile_size, DEFAULT_MAX_LOGFILE_SIZE);
        assert_eq!(config.max_number_logfiles, DEFAULT_MAX_NUMBER_LOGFILES);
    }

    #[test]
    fn test_config_not_found() {
        let result = ConfigFile::load(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    }

    #[test]
    fn test_config_malformed() {
        let result = ConfigFile::from_json("{not json");
        assert!(matches!(result, Err(Error::JsonError(_))));
    }

    #[test]
    fn test_load_or_default_recovers_from_malformed() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{broken").unwrap();

        let config = ConfigFile::load_or_default(Some(file.path()));
        assert_eq!(config.logfile_name, DEFAULT_LOGFILE_NAME);
        assert_eq!(config.max_logfile_size, DEFAULT_MAX_LOGFILE_SIZE);
    }

    #[test]
    fn test_load_or_default_recovers_from_missing() {
        let config = ConfigFile::load_or_default(Some(Path::new("/nonexistent/config.json")));
        assert_eq!(config.max_number_logfiles, DEFAULT_MAX_NUMBER_LOGFILES);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = ConfigFile::from_json(
            r#"{"logfile_name": "from_file.log", "max_logfile_size": 500, "timestamp": true}"#,
        )
        .unwrap();

        let overrides = Overrides {
            logfile_name: Some("from_cli.log".to_string()),
            timestamp: Some(false),
            ..Overrides::default()
        };

        let spec = config.into_spec(overrides).unwrap();
        assert_eq!(spec.logfile_name, "from_cli.log");
        assert_eq!(spec.max_size_bytes, 500);
        assert!(!spec.timestamp);
    }

    #[test]
    fn test_defaults_reach_spec_untouched() {
        let spec = ConfigFile::default().into_spec(Overrides::default()).unwrap();
        assert_eq!(spec.logfile_name, DEFAULT_LOGFILE_NAME);
        assert_eq!(spec.path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(spec.max_files, DEFAULT_MAX_NUMBER_LOGFILES);
        assert_eq!(spec.max_size_bytes, DEFAULT_MAX_LOGFILE_SIZE);
        assert!(!spec.timestamp);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let overrides = Overrides {
            max_number_logfiles: Some(0),
            ..Overrides::default()
        };
        let result = ConfigFile::default().into_spec(overrides);
        assert!(matches!(result, Err(Error::InvalidRetention(0))));
    }

    #[test]
    fn test_empty_logfile_name_rejected() {
        let config = ConfigFile::from_json(r#"{"logfile_name": ""}"#).unwrap();
        let result = config.into_spec(Overrides::default());
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_zero_max_size_rejected() {
        let config = ConfigFile::from_json(r#"{"max_logfile_size": 0}"#).unwrap();
        let result = config.into_spec(Overrides::default());
        assert!(matches!(result, Err(Error::InvalidMaxSize(0))));
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        ConfigFile::write_default(&path).unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.logfile_name, DEFAULT_LOGFILE_NAME);
        assert_eq!(config.max_number_logfiles, DEFAULT_MAX_NUMBER_LOGFILES);
        assert_eq!(config.max_logfile_size, DEFAULT_MAX_LOGFILE_SIZE);
        assert!(!config.timestamp);
    }
}
