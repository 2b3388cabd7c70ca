use crate::error::LoadError;
use middlegen_interpreter::graph::Manifest;
use middlegen_interpreter::Package;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_MANIFEST: &str = "middlegen.types.json";

/// Resolves the type-checked packages found in a directory.
pub trait PackageLoader {
    fn load(&self, dir: &Path) -> Result<Vec<Package>, LoadError>;
}

/// Reads packages from a JSON type manifest stored next to the sources.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    file_name: PathBuf,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::with_file_name(DEFAULT_MANIFEST)
    }

    pub fn with_file_name(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageLoader for ManifestLoader {
    fn load(&self, dir: &Path) -> Result<Vec<Package>, LoadError> {
        let path = self.manifest_path(dir);
        debug!(path = %path.display(), "Reading type manifest");

        let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })?;

        Ok(manifest.packages)
    }
}

/// Serves a fixed set of packages regardless of directory.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    packages: Vec<Package>,
}

impl StaticLoader {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }
}

impl PackageLoader for StaticLoader {
    fn load(&self, _dir: &Path) -> Result<Vec<Package>, LoadError> {
        Ok(self.packages.clone())
    }
}
