// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::ExecutorKind;

/// Graph definition as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// executor = "command"
///
/// [default]
/// can_fail = false
/// repetitions = 1
///
/// [vertex.A]
/// cmd = "echo A"
///
/// [vertex.B]
/// cmd = "echo B"
/// after = ["A"]
/// ```
///
/// All sections are optional at the parsing stage; validation requires at
/// least one vertex.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub default: DefaultSection,

    /// All vertices from `[vertex.<id>]`, keyed by id.
    #[serde(default)]
    pub vertex: BTreeMap<String, VertexConfig>,
}

/// A validated graph definition. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub default: DefaultSection,
    pub vertex: BTreeMap<String, VertexConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        default: DefaultSection,
        vertex: BTreeMap<String, VertexConfig>,
    ) -> Self {
        Self {
            config,
            default,
            vertex,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Execution unit used by the `wavedag` binary; the `--executor` flag
    /// overrides it.
    #[serde(default)]
    pub executor: ExecutorKind,
}

/// `[default]` section: fallbacks for vertices that do not set a value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultSection {
    /// Default failure policy; if `None`, vertices may not fail.
    #[serde(default)]
    pub can_fail: Option<bool>,

    /// Default fan-out; if `None`, one attempt per vertex.
    #[serde(default)]
    pub repetitions: Option<usize>,
}

/// `[vertex.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VertexConfig {
    /// Shell command run by the command executor.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Parents: this vertex waits until every vertex listed here resolves.
    #[serde(default)]
    pub after: Vec<String>,

    #[serde(default)]
    pub repetitions: Option<usize>,

    #[serde(default)]
    pub can_fail: Option<bool>,
}

impl VertexConfig {
    pub fn effective_repetitions(&self, default_repetitions: usize) -> usize {
        self.repetitions.unwrap_or(default_repetitions)
    }

    pub fn effective_can_fail(&self, default_can_fail: bool) -> bool {
        self.can_fail.unwrap_or(default_can_fail)
    }
}
