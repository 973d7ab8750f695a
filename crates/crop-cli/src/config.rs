//! Optional TOML configuration file.
//!
//! ```toml
//! [data]
//! raw_dir = "data/raw"
//! processed_dir = "data/processed"
//!
//! [model]
//! artifact = "models/model_pipeline.json"
//! metadata = "models/model_metadata.json"
//!
//! [bounds]
//! temp_min = -40.0
//! ```
//!
//! Every table and key is optional. Command-line flags take precedence over
//! file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crop_model::InputBounds;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "crop-yield.toml";

/// Name of the consolidated table inside the processed directory.
pub const CONSOLIDATED_FILE: &str = "consolidated.csv";
/// Name of the text summary written next to the consolidated table.
pub const SUMMARY_FILE: &str = "fusion_summary.txt";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataPaths,
    pub model: ModelPaths,
    pub bounds: InputBounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
        }
    }
}

impl DataPaths {
    pub fn consolidated_path(&self) -> PathBuf {
        self.processed_dir.join(CONSOLIDATED_FILE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    pub artifact: PathBuf,
    pub metadata: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from("models/model_pipeline.json"),
            metadata: PathBuf::from("models/model_metadata.json"),
        }
    }
}

impl AppConfig {
    /// Parses a configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse configuration")
    }

    /// Loads `path`, or the default file when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults. A missing file
    /// that was named explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("load configuration {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
