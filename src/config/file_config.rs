//! Configuration file support for paper-convert.
//!
//! This module provides TOML configuration file parsing with support
//! for environment variable overrides.
//!
//! # Configuration File Format
//!
//! ```toml
//! [conversion]
//! dataset_root = "./CORD-19-research-challenge"
//! output_dir = "./text"
//! metadata_file = "all_sources_metadata_2020-03-13.csv"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```
//!
//! Every key can also be set from the environment, e.g.
//! `PAPER_CONVERT__CONVERSION__OUTPUT_DIR=./text`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ConvertConfig, DEFAULT_METADATA_FILE};

/// Configuration file structure
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Conversion section
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory searched recursively for JSON documents; also holds the metadata index
    #[serde(default)]
    pub dataset_root: Option<PathBuf>,

    /// Existing directory that receives the `.txt` files
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Name of the metadata index inside the dataset root
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dataset_root: None,
            output_dir: None,
            metadata_file: default_metadata_file(),
        }
    }
}

fn default_metadata_file() -> String {
    DEFAULT_METADATA_FILE.to_string()
}

/// Log output format
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ConfigFile {
    /// Apply command-line overrides; `None` keeps the configured value
    pub fn apply_overrides(
        &mut self,
        dataset_root: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        metadata_file: Option<String>,
    ) {
        if dataset_root.is_some() {
            self.conversion.dataset_root = dataset_root;
        }
        if output_dir.is_some() {
            self.conversion.output_dir = output_dir;
        }
        if let Some(metadata_file) = metadata_file {
            self.conversion.metadata_file = metadata_file;
        }
    }

    /// The run configuration, if both the dataset root and output directory are known
    pub fn convert_config(&self) -> Option<ConvertConfig> {
        let conversion = &self.conversion;
        Some(
            ConvertConfig::new(
                conversion.dataset_root.clone()?,
                conversion.output_dir.clone()?,
            )
            .with_metadata_file(conversion.metadata_file.clone()),
        )
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
