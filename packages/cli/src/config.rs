use middlegen_generator::{GenerateOptions, DEFAULT_MANIFEST};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "middlegen.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Middlegen configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Type manifest file name, relative to the package directory
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Where generated files go (defaults to the working directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    /// Emit the generated-code header
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}

fn default_header() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: config_path,
            source,
        })
    }

    /// Absolute output directory
    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        match &self.out_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            header: self.header,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            out_dir: None,
            header: default_header(),
        }
    }
}
