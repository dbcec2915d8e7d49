// Settings management

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tapcheck_recon::{HeaderNames, DEFAULT_MESSAGE_BUDGET};

/// 25 MiB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound for the summary text, in bytes.
    pub message_budget: usize,

    /// Files above this size are refused before reading.
    pub max_file_bytes: u64,

    /// Wall-clock limit for one file.
    pub timeout_secs: u64,

    /// Accepted header names per column.
    pub columns: HeaderNames,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            message_budget: DEFAULT_MESSAGE_BUDGET,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            columns: HeaderNames::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Serialize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
            Self::Parse { path, message } => {
                write!(f, "invalid settings in {}: {}", path.display(), message)
            }
            Self::Serialize(message) => write!(f, "cannot serialize settings: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tapcheck");
        config_dir.join("settings.toml")
    }

    /// Load settings from the default location. A missing file gives defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file gives defaults; a file that
    /// exists but cannot be read or parsed is an error for the caller to
    /// report.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
