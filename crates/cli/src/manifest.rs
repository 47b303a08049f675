//! Job manifests: the list of trees to snapshot, read from JSON or YAML.
//!
//! ```yaml
//! suffixes: [".ts", ".tsx"]
//! jobs:
//!   - name: backend
//!     root: backend/src
//!     output: backend.txt
//!   - root: frontend/src
//!     output: frontend.txt
//!     exclude: ["*.spec.ts"]
//! ```
//!
//! Relative paths are resolved against the manifest's own directory.

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Suffixes for every job that does not list its own.
    #[serde(default)]
    pub suffixes: Option<Vec<String>>,
    #[serde(default)]
    pub jobs: Vec<ManifestJob>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestJob {
    #[serde(default)]
    pub name: Option<String>,
    pub root: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub suffixes: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Manifest {
    /// Read and parse a manifest; `.yml`/`.yaml` files are YAML, anything else JSON.
    ///
    /// # Errors
    /// Returns [`AppError::ManifestRead`] if the file cannot be read and
    /// [`AppError::Manifest`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manifest = Self::parse(&text, is_yaml(path)).map_err(|message| {
            AppError::Manifest {
                path: path.to_path_buf(),
                message,
            }
        })?;

        if let Some(base) = path.parent() {
            manifest.resolve_relative_to(base);
        }
        Ok(manifest)
    }

    fn parse(text: &str, yaml: bool) -> std::result::Result<Self, String> {
        if yaml {
            serde_yaml::from_str(text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(text).map_err(|e| e.to_string())
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for job in &mut self.jobs {
            if job.root.is_relative() {
                job.root = base.join(&job.root);
            }
            if job.output.is_relative() {
                job.output = base.join(&job.output);
            }
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"))
}
