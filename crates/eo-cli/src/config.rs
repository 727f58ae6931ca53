//! Where the catalog lives and how strict search is.
//!
//! Resolution order for each setting: command-line flag, then the
//! `EO_CATALOG_SOURCE` environment variable (source only), then the user
//! config file, then the built-in default.

use anyhow::{Context, Result, bail};
use eo_catalog::search::DEFAULT_THRESHOLD;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SOURCE_ENV: &str = "EO_CATALOG_SOURCE";

/// Written by `eo assemble` when run from the project root
pub const DEFAULT_SOURCE: &str = "eo/eo.json";

/// Contents of `<config dir>/eo-catalog/config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<String>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: String,
    pub threshold: f64,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("eo-catalog").join("config.toml"))
}

fn load_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

impl Config {
    pub fn load(source_flag: Option<String>, threshold_flag: Option<f64>) -> Result<Self> {
        let file = match config_path() {
            Some(path) => {
                log::debug!("Reading config from {}", path.display());
                load_file(&path)?
            }
            None => FileConfig::default(),
        };
        let env = std::env::var(SOURCE_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::resolve(source_flag, threshold_flag, env, file)
    }

    fn resolve(
        source_flag: Option<String>,
        threshold_flag: Option<f64>,
        env_source: Option<String>,
        file: FileConfig,
    ) -> Result<Self> {
        let source = source_flag
            .or(env_source)
            .or(file.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let threshold = threshold_flag
            .or(file.threshold)
            .unwrap_or(DEFAULT_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            bail!("Search threshold must be between 0 and 1, got {threshold}");
        }

        Ok(Self { source, threshold })
    }
}
