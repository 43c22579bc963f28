// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WavedagError};
use crate::types::ExecutorKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = WavedagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.default, raw.vertex))
    }
}

/// Run every check against an unvalidated config.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_vertices(cfg)?;
    validate_repetitions(cfg)?;
    validate_dependencies(cfg)?;
    validate_commands(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_vertices(cfg: &RawConfigFile) -> Result<()> {
    if cfg.vertex.is_empty() {
        return Err(WavedagError::ConfigError(
            "config must contain at least one [vertex.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_repetitions(cfg: &RawConfigFile) -> Result<()> {
    if cfg.default.repetitions == Some(0) {
        return Err(WavedagError::ConfigError(
            "[default].repetitions must be >= 1 (got 0)".to_string(),
        ));
    }

    for (name, vertex) in cfg.vertex.iter() {
        if vertex.repetitions == Some(0) {
            return Err(WavedagError::ConfigError(format!(
                "vertex '{}' has repetitions = 0; must be >= 1",
                name
            )));
        }
    }
    Ok(())
}

fn validate_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, vertex) in cfg.vertex.iter() {
        for dep in vertex.after.iter() {
            if !cfg.vertex.contains_key(dep) {
                return Err(WavedagError::ConfigError(format!(
                    "vertex '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(WavedagError::ConfigError(format!(
                    "vertex '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.executor != ExecutorKind::Command {
        return Ok(());
    }

    for (name, vertex) in cfg.vertex.iter() {
        match vertex.cmd.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => {}
            _ => {
                return Err(WavedagError::ConfigError(format!(
                    "vertex '{}' has no `cmd` but [config].executor = \"command\"",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> vertex, so `after = ["A"]` on B is A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.vertex.keys() {
        graph.add_node(name.as_str());
    }

    for (name, vertex) in cfg.vertex.iter() {
        for dep in vertex.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(WavedagError::DagCycle(format!(
            "cycle detected in vertex graph involving vertex '{}'",
            cycle.node_id()
        ))),
    }
}
