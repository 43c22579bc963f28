// src/config/mod.rs

//! TOML graph definitions.
//!
//! - [`model`] is the serde data model.
//! - [`loader`] reads a file from disk.
//! - [`validate`] turns a `RawConfigFile` into a checked `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, DefaultSection, RawConfigFile, VertexConfig};
pub use validate::validate_raw_config;
