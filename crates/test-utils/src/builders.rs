#![allow(dead_code)]

use std::collections::BTreeMap;
use wavedag::config::{ConfigFile, ConfigSection, DefaultSection, RawConfigFile, VertexConfig};
use wavedag::dag::{Dag, Vertex};
use wavedag::types::ExecutorKind;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                default: DefaultSection::default(),
                vertex: BTreeMap::new(),
            },
        }
    }

    pub fn with_vertex(mut self, name: &str, vertex: VertexConfig) -> Self {
        self.config.vertex.insert(name.to_string(), vertex);
        self
    }

    pub fn with_executor(mut self, kind: ExecutorKind) -> Self {
        self.config.config.executor = kind;
        self
    }

    pub fn with_default_can_fail(mut self, val: bool) -> Self {
        self.config.default.can_fail = Some(val);
        self
    }

    pub fn with_default_repetitions(mut self, n: usize) -> Self {
        self.config.default.repetitions = Some(n);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `VertexConfig`.
pub struct VertexConfigBuilder {
    vertex: VertexConfig,
}

impl VertexConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            vertex: VertexConfig {
                cmd: Some(cmd.to_string()),
                after: vec![],
                repetitions: None,
                can_fail: None,
            },
        }
    }

    /// A vertex without a command (only valid with the coin-flip executor).
    pub fn bare() -> Self {
        Self {
            vertex: VertexConfig::default(),
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.vertex.after.push(dep.to_string());
        self
    }

    pub fn repetitions(mut self, n: usize) -> Self {
        self.vertex.repetitions = Some(n);
        self
    }

    pub fn can_fail(mut self, val: bool) -> Self {
        self.vertex.can_fail = Some(val);
        self
    }

    pub fn build(self) -> VertexConfig {
        self.vertex
    }
}

/// Build a graph from vertices and `(from, to)` edges, panicking on any
/// construction error.
pub fn dag_from(vertices: Vec<Vertex>, edges: &[(&str, &str)]) -> Dag {
    let mut dag = Dag::new();
    for v in vertices {
        dag.add_vertex(v).expect("add_vertex on a fresh graph");
    }
    for (from, to) in edges {
        dag.add_edge(from, to).expect("acyclic test edge");
    }
    dag
}

/// Vertices A..E and the edges A->B, A->C, B->D, C->D, D->E, A->D, A->E,
/// C->E.
pub fn five_vertex_dag(can_fail: bool) -> Dag {
    dag_from(
        ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|id| Vertex::new(id).can_fail(can_fail))
            .collect(),
        &FIVE_VERTEX_EDGES,
    )
}

pub const FIVE_VERTEX_EDGES: [(&str, &str); 8] = [
    ("A", "B"),
    ("A", "C"),
    ("B", "D"),
    ("C", "D"),
    ("D", "E"),
    ("A", "D"),
    ("A", "E"),
    ("C", "E"),
];
