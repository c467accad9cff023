use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use log::LevelFilter;
use crate::errors::AppError;

/// Application configuration module
/// This module handles loading and validating the converter settings.
/// Every field is optional in the JSON file; missing fields take their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory for converted files; next to each input when unset
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Replace output files that already exist
    #[serde(default)]
    pub force_overwrite: bool,

    /// Descend into subdirectories when an input is a directory
    #[serde(default = "default_true")]
    pub recursive: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .map_err(|e| AppError::File(format!("Failed to open config file {:?}: {}", path, e)))?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if dir.trim().is_empty() {
                return Err(anyhow!("Output directory must not be empty when set"));
            }
        }

        Ok(())
    }

    // @returns: Configured output directory as a path
    pub fn output_dir_path(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(PathBuf::from)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            output_dir: None,
            force_overwrite: false,
            recursive: default_true(),
        }
    }
}
