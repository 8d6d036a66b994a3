//! CLI configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use weft_feature::EngineConfig;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".weft.json";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Output format of the `read` and `transform` commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One-line s-expression
    #[default]
    Tree,
    /// Nested JSON objects
    Json,
}

/// Contents of `.weft.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Engine limits.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Default output format.
    #[serde(default)]
    pub format: Format,
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Finds a configuration file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }
}
