//! Loading of the `exocortex.json` configuration file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file kept at the repository root.
pub const CONFIG_FILE_NAME: &str = "exocortex.json";

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_SYNC_INTERVAL: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where the wiki lives and how it is kept in sync.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository root. An empty path means "the directory holding the
    /// config file" when loaded with `Config::load`.
    pub repo: PathBuf,
    pub remote: String,
    pub branch: String,
    /// Seconds between background sync cycles.
    pub sync_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a JSON config file.
    ///
    /// A missing or empty `repo` resolves to the config file's directory; a
    /// relative `repo` is taken relative to that directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        if config.repo.as_os_str().is_empty() || config.repo == Path::new(".") {
            config.repo = base.to_path_buf();
        } else if config.repo.is_relative() {
            config.repo = base.join(&config.repo);
        }
        if config.repo.as_os_str().is_empty() {
            config.repo = PathBuf::from(".");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_repo<P: Into<PathBuf>>(mut self, repo: P) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_sync_interval(mut self, seconds: u64) -> Self {
        self.sync_interval = seconds;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.trim().is_empty() {
            return Err(ConfigError::Invalid("remote cannot be empty".to_string()));
        }

        if self.branch.trim().is_empty() {
            return Err(ConfigError::Invalid("branch cannot be empty".to_string()));
        }

        if self.sync_interval == 0 {
            return Err(ConfigError::Invalid(
                "sync_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
