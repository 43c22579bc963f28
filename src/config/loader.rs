// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a graph definition and return the raw, unvalidated `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a graph definition from path and validate it:
///
/// - at least one vertex,
/// - `after` references exist and are not self-references,
/// - repetitions are at least 1,
/// - the `after` relation is acyclic,
/// - every vertex has a `cmd` when the command executor is configured.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// `Wavedag.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Wavedag.toml")
}
