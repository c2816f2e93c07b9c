//! Descriptor manifests.
//!
//! A manifest lists the configuration types the host discovered, in the
//! shape of [`metatype::ConfigurationType`]. JSON and TOML are accepted;
//! the format is chosen by file extension.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use metatype::ConfigurationType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest-level errors that are not I/O or parse failures.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The extension is neither `json` nor `toml`.
    #[error("unsupported manifest format `{0}` (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// All configuration types to generate artifacts for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Configuration types in processing order.
    #[serde(default)]
    pub configurations: Vec<ConfigurationType>,
}

impl Manifest {
    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse JSON manifest")
    }

    /// Parses a TOML manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML manifest")
    }

    /// Reads a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let manifest = match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "toml" => Self::from_toml_str(&text),
            _ => return Err(ManifestError::UnsupportedFormat(ext).into()),
        };
        manifest.with_context(|| format!("Invalid manifest: {}", path.display()))
    }
}
