//! `~/.tinydbrc` handling.

use directories::BaseDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// File name looked up in the home directory.
pub const RC_FILE: &str = ".tinydbrc";

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("config file {0} does not exist")]
    Missing(PathBuf),
    /// File exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// File is not valid JSON for [`Config`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Client settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interactive prompt.
    pub prompt: String,
    /// Log filter directive.
    pub log_level: String,
    /// Directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// Emit log records as JSON.
    pub log_json: bool,
    /// Print statements as JSON instead of debug output.
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "tinydb> ".to_string(),
            log_level: "warn".to_string(),
            log_dir: None,
            log_json: false,
            json_output: false,
        }
    }
}

/// `$HOME/.tinydbrc`, if a home directory can be resolved.
pub fn default_path() -> Option<PathBuf> {
    BaseDirs::new().map(|b| b.home_dir().join(RC_FILE))
}

impl Config {
    /// Load `explicit` if given, else the default rc file if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
