//! Run configuration: defaults, optional TOML file, command-line overrides.

use crate::cli::RunArgs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "formdetails.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub append_file: PathBuf,
    pub log_dir: PathBuf,
    pub merge_log: PathBuf,
    pub normalize_log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("add"),
            output_dir: PathBuf::from("out"),
            append_file: PathBuf::from("append_json.json"),
            log_dir: PathBuf::from("."),
            merge_log: PathBuf::from("merge_json.log"),
            normalize_log: PathBuf::from("process_json.log"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(String),

    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

impl Config {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load `explicit`, or the default config file if one exists.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::Missing(path.display().to_string()));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, &path)
    }

    pub fn with_overrides(mut self, args: &RunArgs, append_file: Option<&str>) -> Self {
        if let Some(dir) = &args.input_dir {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = &args.log_dir {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(file) = append_file {
            self.append_file = PathBuf::from(file);
        }
        self
    }

    pub fn merge_log_path(&self) -> PathBuf {
        self.log_dir.join(&self.merge_log)
    }

    pub fn normalize_log_path(&self) -> PathBuf {
        self.log_dir.join(&self.normalize_log)
    }
}
